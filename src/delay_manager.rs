use std::ops::RangeInclusive;
use std::thread;
use std::time::Duration;
use rand::Rng;
use log::info;

/// Sleeps for a whole number of seconds drawn uniformly from `bounds`.
pub fn random_page_delay(bounds: &RangeInclusive<u64>) {
    if bounds.is_empty() || *bounds.end() == 0 {
        return;
    }
    let mut rng = rand::thread_rng();
    let delay_secs = rng.gen_range(bounds.clone());
    info!("Waiting for {} seconds (Page Delay)...", delay_secs);
    thread::sleep(Duration::from_secs(delay_secs));
}
