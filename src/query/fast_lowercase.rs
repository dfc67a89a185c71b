/// Case folding helpers shared by table-name normalization and key matching.
/// ASCII input takes the cheap path, anything else goes through Unicode lowering.
pub trait FastLowercase {
    fn fast_to_lowercase(&self) -> String;

    /// Lowercased copy with one space added on each side, so a plain
    /// substring test only succeeds on whole words or phrases.
    fn padded_lowercase(&self) -> String;
}

impl FastLowercase for str {
    #[inline]
    fn fast_to_lowercase(&self) -> String {
        if self.is_ascii() {
            self.to_ascii_lowercase()
        } else {
            self.to_lowercase()
        }
    }

    #[inline]
    fn padded_lowercase(&self) -> String {
        let mut padded = String::with_capacity(self.len() + 2);
        padded.push(' ');
        padded.push_str(&self.fast_to_lowercase());
        padded.push(' ');
        padded
    }
}
