//! Per-dataset summary of a result store

use crate::storage::ResultStore;

/// Record counts per dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSummary {
    /// (dataset id, record count), largest datasets first
    pub datasets: Vec<(String, usize)>,

    /// Records across all datasets
    pub total_records: usize,
}

/// Counts records per dataset, sorted by count (descending) then id
pub fn summarize_store(store: &ResultStore) -> StoreSummary {
    let mut datasets: Vec<(String, usize)> = store
        .datasets()
        .map(|(id, records)| (id.clone(), records.len()))
        .collect();
    datasets.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let total_records = datasets.iter().map(|(_, count)| count).sum();

    StoreSummary {
        datasets,
        total_records,
    }
}

/// Prints a summary to stdout
pub fn print_store_summary(summary: &StoreSummary) {
    let rule = "=".repeat(80);

    println!("\n{rule}");
    println!(
        "SUMMARY: {} datasets, {} total reactions",
        summary.datasets.len(),
        summary.total_records
    );
    println!("{rule}\n");

    for (dataset, count) in &summary.datasets {
        println!("{}: {} reactions", dataset, count);
    }

    println!("\n{rule}");
    println!(
        "Total: {} datasets, {} reactions",
        summary.datasets.len(),
        summary.total_records
    );
    println!("{rule}");
}
