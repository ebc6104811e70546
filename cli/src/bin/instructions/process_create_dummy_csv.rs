use crate::*;

pub fn process_create_dummy_csv(args: &CreateDummyCsv) -> Result<()> {
    let entries: Vec<CsvEntry> = (0..args.num_records)
        .map(|_| CsvEntry {
            pubkey: random_pubkey().to_string(),
            amount: args.amount,
        })
        .collect();

    CsvEntry::write_to_file(&entries, &args.csv_path)?;
    println!(
        "wrote {} records to {}",
        entries.len(),
        args.csv_path.display()
    );
    Ok(())
}
