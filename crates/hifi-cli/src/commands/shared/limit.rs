/// Compute effective limit with precedence: global flag -> config default.
#[must_use]
pub fn effective_limit(global: Option<u32>, fallback: u32) -> u32 {
    global.filter(|n| *n > 0).unwrap_or(fallback)
}
