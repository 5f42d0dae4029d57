use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for a carrier. One carrier may file rates under several
/// NAIC codes, so this is the identity the engine compares against, never the
/// raw NAIC string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Carrier(pub String);

/// Bidirectional carrier/NAIC lookup collaborator. The engine consumes this
/// interface; the production registry lives outside this crate.
pub trait CarrierRegistry: Send + Sync {
    /// Every NAIC code the carrier files under.
    fn carrier_to_naics(&self, carrier: &Carrier) -> Vec<String>;

    /// Resolve an NAIC code to its owning carrier, if known.
    fn naic_to_carrier(&self, naic: &str) -> Option<Carrier>;

    /// Resolve a free-text carrier name (e.g. the shopper's "current carrier"
    /// entry) to a carrier identity. Matching is trimmed and case-insensitive
    /// across display names and known aliases.
    fn resolve(&self, raw: &str) -> Option<Carrier>;

    /// Display name for a carrier identity.
    fn display_name(&self, carrier: &Carrier) -> String;

    /// Logo path for an NAIC code, if the code maps to a known carrier.
    fn logo_path(&self, naic: &str) -> Option<String> {
        self.naic_to_carrier(naic)
            .map(|carrier| format!("/images/carriers/{}.png", carrier.0))
    }
}

#[derive(Debug, Clone)]
struct CarrierEntry {
    display_name: String,
    naics: Vec<String>,
    aliases: Vec<String>,
}

/// In-memory registry seeded from a fixed table, so the engine and its tests
/// can run without the production lookup service.
#[derive(Debug, Clone, Default)]
pub struct StaticCarrierRegistry {
    entries: HashMap<Carrier, CarrierEntry>,
    by_naic: HashMap<String, Carrier>,
}

impl StaticCarrierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_carrier(mut self, key: &str, display_name: &str, naics: &[&str]) -> Self {
        self.insert(key, display_name, naics, &[]);
        self
    }

    pub fn with_aliased_carrier(
        mut self,
        key: &str,
        display_name: &str,
        naics: &[&str],
        aliases: &[&str],
    ) -> Self {
        self.insert(key, display_name, naics, aliases);
        self
    }

    fn insert(&mut self, key: &str, display_name: &str, naics: &[&str], aliases: &[&str]) {
        let carrier = Carrier(key.to_string());
        for naic in naics {
            self.by_naic.insert((*naic).to_string(), carrier.clone());
        }
        self.entries.insert(
            carrier,
            CarrierEntry {
                display_name: display_name.to_string(),
                naics: naics.iter().map(|naic| (*naic).to_string()).collect(),
                aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
            },
        );
    }

    /// Illustrative seed covering the carriers the demo and tests quote.
    pub fn seeded() -> Self {
        Self::new()
            .with_aliased_carrier(
                "mutual-of-omaha",
                "Mutual of Omaha",
                &["71412", "13100"],
                &["Omaha", "United of Omaha"],
            )
            .with_aliased_carrier("aetna", "Aetna", &["78700", "72052"], &["Aetna Health"])
            .with_carrier("cigna", "Cigna", &["88366"])
            .with_aliased_carrier(
                "uhc",
                "UnitedHealthcare",
                &["79413"],
                &["United Healthcare", "AARP"],
            )
            .with_carrier("humana", "Humana", &["60219", "73288"])
    }
}

fn normalize_lookup(value: &str) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

impl CarrierRegistry for StaticCarrierRegistry {
    fn carrier_to_naics(&self, carrier: &Carrier) -> Vec<String> {
        self.entries
            .get(carrier)
            .map(|entry| entry.naics.clone())
            .unwrap_or_default()
    }

    fn naic_to_carrier(&self, naic: &str) -> Option<Carrier> {
        self.by_naic.get(naic.trim()).cloned()
    }

    fn resolve(&self, raw: &str) -> Option<Carrier> {
        let wanted = normalize_lookup(raw);
        if wanted.is_empty() {
            return None;
        }

        self.entries.iter().find_map(|(carrier, entry)| {
            let names = std::iter::once(entry.display_name.as_str())
                .chain(entry.aliases.iter().map(String::as_str));
            names
                .into_iter()
                .any(|name| normalize_lookup(name) == wanted)
                .then(|| carrier.clone())
        })
    }

    fn display_name(&self, carrier: &Carrier) -> String {
        self.entries
            .get(carrier)
            .map(|entry| entry.display_name.clone())
            .unwrap_or_else(|| carrier.0.clone())
    }
}
