/// IdentifierNormalizer service producing comparison keys for identifiers
///
/// The key is the lower-cased input with every non-alphanumeric character
/// (underscore included) removed. It is only ever used for comparison and is
/// never written back into a document.
pub struct IdentifierNormalizer;

impl IdentifierNormalizer {
    /// Normalizes `input` into its comparison key. Total and idempotent.
    pub fn normalize(input: &str) -> String {
        input
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_alphanumeric())
            .collect()
    }
}
