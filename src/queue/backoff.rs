//! Delay calculations for the serial queue.

use std::time::Duration;

use rand::Rng;

/// Backoff before a failed job is retried.
///
/// `depth` is the number of pending jobs right after the failed job was put
/// back at the head, so a lone failing job waits `2 * base_ms`. The delay grows
/// with queue depth, not with how often the job itself has failed.
pub fn depth_backoff(depth: usize, base_ms: u64) -> Duration {
    let exponent = u32::try_from(depth).unwrap_or(u32::MAX);
    let factor = 2u64.saturating_pow(exponent);
    Duration::from_millis(base_ms.saturating_mul(factor))
}

/// Random pause between jobs, uniform over `[min_ms, max_ms]`.
pub fn inter_job_delay(min_ms: u64, max_ms: u64) -> Duration {
    if max_ms <= min_ms {
        return Duration::from_millis(min_ms);
    }
    Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_backoff() {
        assert_eq!(depth_backoff(0, 1000), Duration::from_millis(1000));
        assert_eq!(depth_backoff(1, 1000), Duration::from_millis(2000));
        assert_eq!(depth_backoff(3, 1000), Duration::from_millis(8000));
        assert_eq!(depth_backoff(5, 10), Duration::from_millis(320));
    }

    #[test]
    fn test_depth_backoff_saturates() {
        assert_eq!(depth_backoff(200, 1000), Duration::from_millis(u64::MAX));
    }

    #[test]
    fn test_inter_job_delay_window() {
        for _ in 0..100 {
            let d = inter_job_delay(1500, 3500);
            assert!(d >= Duration::from_millis(1500));
            assert!(d <= Duration::from_millis(3500));
        }
        assert_eq!(inter_job_delay(0, 0), Duration::ZERO);
    }
}
