// Transform descriptors binding a lens to include/exclude file globs.
use crate::core::error::{Error, ErrorKind};

/// A named grouping of lens plus include/exclude glob patterns, later
/// materialized as writes under the reserved `/augeas/load/<name>` region.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Transform {
    /// Lens identifier, e.g. `"Hosts.lns"`.
    pub lens: String,
    /// Load-region name; derived from the lens when absent.
    pub name: Option<String>,
    /// Glob patterns of files the lens applies to. At least one is required.
    pub incl: Vec<String>,
    /// Glob patterns excluded from `incl`.
    pub excl: Vec<String>,
}

impl Transform {
    pub fn new(lens: impl Into<String>) -> Self {
        Self {
            lens: lens.into(),
            name: None,
            incl: Vec::new(),
            excl: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn incl(mut self, pattern: impl Into<String>) -> Self {
        self.incl.push(pattern.into());
        self
    }

    pub fn excl(mut self, pattern: impl Into<String>) -> Self {
        self.excl.push(pattern.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.lens.is_empty() {
            return Err(Error::new(ErrorKind::Usage).with_message("transform requires a lens"));
        }
        if self.incl.is_empty() {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("transform requires at least one incl pattern"));
        }
        Ok(())
    }

    pub(crate) fn load_name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => derive_name(&self.lens),
        }
    }
}

// Default name: lens identifier without its trailing module qualifier
// ("Hosts.lns" -> "Hosts") and without a leading sigil ("@Json" -> "Json").
pub(crate) fn derive_name(lens: &str) -> &str {
    let base = lens.split('.').next().unwrap_or(lens);
    base.strip_prefix('@').unwrap_or(base)
}
