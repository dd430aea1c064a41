//! Interface message catalog.
//!
//! Messages are looked up along the request language's fallback chain; a key
//! with no translation anywhere renders as the key itself. `%s` placeholders
//! are replaced by parameters in order.

use libreviews_types::{ErrorMessage, Language};

type Catalog = &'static [(&'static str, &'static str)];

const EN: Catalog = &[
    ("site name", "lib.reviews"),
    ("signed in as", "Signed in as %s"),
    ("not signed in", "Not signed in"),
    ("search", "Search"),
    ("search placeholder", "Search for things and reviews"),
    ("search results", "Search results for \u{201c}%s\u{201d}"),
    ("things", "Things"),
    ("reviews", "Reviews"),
    ("review of", "Review of %s"),
    ("no search results", "No results."),
    ("search unavailable", "Search is currently unavailable. Please try again later."),
    ("links", "Links"),
    ("aliases", "Also known as"),
    ("no reviews", "Nobody has reviewed this yet."),
    ("star rating", "%s out of 5 stars"),
    ("edit", "Edit"),
    ("edit label", "Edit label"),
    ("edit label of", "Edit label of %s"),
    ("label", "Label"),
    ("label in", "Label in %s"),
    ("save", "Save"),
    ("edit saved", "Your changes have been saved."),
    ("no empty label", "The label cannot be empty."),
    ("edit conflict", "Someone else changed this while you were editing. Please try again."),
    ("signin required", "You must be signed in to do that."),
    ("signin required title", "Sign-in required"),
    ("permission error", "You do not have permission to do that."),
    ("permission error title", "Permission denied"),
    ("resource not found", "The requested item could not be found. It may have been deleted."),
    ("resource not found title", "Not found"),
    ("unknown error", "An unknown error occurred. The details have been logged."),
    ("unknown error title", "Something went wrong"),
    ("error details", "Error details"),
    ("error title", "There was a problem"),
    ("unknown preference", "Unknown preference: %s."),
    ("invalid review", "The review is incomplete: %s."),
    ("rich text mode", "Rich text"),
    ("markdown mode", "Markdown"),
    ("pin editor mode", "Always use this editor mode"),
    ("unpin editor mode", "Stop using this editor mode by default"),
];

const DE: Catalog = &[
    ("signed in as", "Angemeldet als %s"),
    ("not signed in", "Nicht angemeldet"),
    ("search", "Suche"),
    ("search results", "Suchergebnisse für \u{201e}%s\u{201c}"),
    ("things", "Dinge"),
    ("reviews", "Rezensionen"),
    ("no search results", "Keine Ergebnisse."),
    ("links", "Links"),
    ("no reviews", "Hierzu gibt es noch keine Rezensionen."),
    ("star rating", "%s von 5 Sternen"),
    ("edit", "Bearbeiten"),
    ("edit label", "Bezeichnung bearbeiten"),
    ("edit label of", "Bezeichnung von %s bearbeiten"),
    ("label", "Bezeichnung"),
    ("save", "Speichern"),
    ("edit saved", "Deine Änderungen wurden gespeichert."),
    ("no empty label", "Die Bezeichnung darf nicht leer sein."),
    ("edit conflict", "Jemand anderes hat dies während deiner Bearbeitung geändert. Bitte versuche es erneut."),
    ("signin required", "Du musst angemeldet sein, um das zu tun."),
    ("permission error", "Du hast keine Berechtigung, das zu tun."),
    ("resource not found", "Das angeforderte Objekt wurde nicht gefunden."),
    ("unknown error", "Ein unbekannter Fehler ist aufgetreten."),
    ("rich text mode", "Formatierter Text"),
];

const FR: Catalog = &[
    ("signed in as", "Connecté en tant que %s"),
    ("not signed in", "Non connecté"),
    ("search", "Recherche"),
    ("search results", "Résultats de recherche pour « %s »"),
    ("things", "Choses"),
    ("reviews", "Critiques"),
    ("no search results", "Aucun résultat."),
    ("links", "Liens"),
    ("no reviews", "Personne n’a encore écrit de critique."),
    ("star rating", "%s étoiles sur 5"),
    ("edit", "Modifier"),
    ("edit label", "Modifier le libellé"),
    ("edit label of", "Modifier le libellé de %s"),
    ("label", "Libellé"),
    ("save", "Enregistrer"),
    ("edit saved", "Vos modifications ont été enregistrées."),
    ("no empty label", "Le libellé ne peut pas être vide."),
    ("edit conflict", "Quelqu'un d'autre a modifié ceci pendant votre modification. Veuillez réessayer."),
    ("signin required", "Vous devez être connecté pour faire cela."),
    ("permission error", "Vous n’avez pas la permission de faire cela."),
    ("resource not found", "L’élément demandé est introuvable."),
    ("unknown error", "Une erreur inconnue s’est produite."),
    ("rich text mode", "Texte enrichi"),
];

/// Editor strings shipped to the browser in the page config.
pub const EDITOR_MESSAGES: &[&str] = &[
    "rich text mode",
    "markdown mode",
    "pin editor mode",
    "unpin editor mode",
];

fn catalog(lang: Language) -> Option<Catalog> {
    match lang.code() {
        "en" => Some(EN),
        "de" => Some(DE),
        "fr" => Some(FR),
        _ => None,
    }
}

fn lookup(lang: Language, key: &str) -> Option<&'static str> {
    lang.fallback_chain().into_iter().find_map(|l| {
        catalog(l)?
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    })
}

/// Translates `key` into `lang`, substituting `%s` placeholders.
pub fn translate<S: AsRef<str>>(lang: Language, key: &str, params: &[S]) -> String {
    let template = lookup(lang, key).unwrap_or(key);
    let mut params = params.iter();
    let mut out = String::with_capacity(template.len());
    let mut pieces = template.split("%s");
    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    for piece in pieces {
        match params.next() {
            Some(p) => out.push_str(p.as_ref()),
            None => out.push_str("%s"),
        }
        out.push_str(piece);
    }
    out
}

/// Shorthand for a message without parameters.
pub fn t(lang: Language, key: &str) -> String {
    translate::<&str>(lang, key, &[])
}

/// Renders an error message with its HTML-escaped parameters. The result is
/// safe to embed in markup as long as the catalog entry itself is.
pub fn translate_error(lang: Language, message: &ErrorMessage) -> String {
    translate(lang, message.key(), &message.to_escaped_array())
}

/// Picks the best supported language from an `Accept-Language` header.
pub fn negotiate(accept_language: &str) -> Option<Language> {
    let mut ranges: Vec<(&str, f32)> = accept_language
        .split(',')
        .filter_map(|part| {
            let mut fields = part.split(';');
            let tag = fields.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let quality = fields
                .find_map(|f| f.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            Some((tag, quality))
        })
        .filter(|(_, q)| *q > 0.0)
        .collect();
    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranges.into_iter().find_map(|(tag, _)| Language::parse(tag))
}
