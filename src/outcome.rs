//! Accumulates the result of every action taken during a run

#[derive(Debug, Default)]
pub struct OutcomeLog {
    removed: Vec<String>,
    errors: Vec<String>,
}

impl OutcomeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints the action with a status glyph and stores it
    pub fn record<S: Into<String>>(&mut self, action: S, success: bool) {
        let action = action.into();
        if success {
            println!("✓ {}", action);
            self.removed.push(action);
        } else {
            println!("✗ {}", action);
            log::warn!("{}", action);
            self.errors.push(action);
        }
    }

    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn print_summary(&self) {
        println!("✅ Successfully removed: {} items", self.removed.len());
        println!("❌ Errors encountered: {} items", self.errors.len());
        if !self.errors.is_empty() {
            println!("\n⚠️  Errors:");
            for error in &self.errors {
                println!("  - {}", error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_order_and_splits_by_status() {
        let mut log = OutcomeLog::new();
        log.record("first", true);
        log.record(String::from("broken"), false);
        log.record("second", true);
        assert_eq!(log.removed(), &["first", "second"]);
        assert_eq!(log.errors(), &["broken"]);
    }
}
