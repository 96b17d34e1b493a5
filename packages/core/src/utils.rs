// ABOUTME: Shared utility functions for Taskboard
// ABOUTME: ID generation and export file naming

use chrono::NaiveDate;
use rand::Rng;

const ID_LENGTH: usize = 12;

/// Generate a unique record ID (12 alphanumeric characters)
pub fn generate_id() -> String {
    const CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// File name of a data export taken on `date`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("task-app-backup-{}.json", date.format("%Y-%m-%d"))
}
