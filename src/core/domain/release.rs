/// Outcome of the version tagger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Release number for this deployment
    pub version: u64,
    /// Full tag name, e.g. `VERSION-CHECKOUT-MAIN-7`
    pub tag: String,
    /// Whether a new tag was created and pushed by this run
    pub created: bool,
}
