//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats};

/// Logs the failure count for every kind that occurred.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();

    if total_errors > 0 {
        info!("Failure Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_statistics_empty() {
        print_error_statistics(&ProcessingStats::new());
    }

    #[test]
    fn test_print_error_statistics_with_failures() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::ResolutionFailed);
        stats.increment_error(ErrorType::Timeout);
        print_error_statistics(&stats);
        assert_eq!(stats.total_errors(), 2);
    }
}
