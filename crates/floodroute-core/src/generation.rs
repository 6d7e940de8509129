//! Generation tokens for last-writer-wins async completions.
//!
//! Every request takes a fresh token; issuing a new token invalidates all
//! earlier ones. A completion may only touch shared state while its token is
//! still current.

/// Token handed to an in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next token, superseding every earlier one.
    pub fn advance(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    pub fn is_current(&self, token: Generation) -> bool {
        token.0 == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_invalidates_previous_tokens() {
        let mut counter = GenerationCounter::new();
        let first = counter.advance();
        assert!(counter.is_current(first));

        let second = counter.advance();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
        assert!(second > first);
    }
}
