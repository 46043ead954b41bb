use kubus::core::write_ntriples_line;
use kubus::encoding::ObservationEncoder;
use kubus::schema::infer_schema_from_sample;
use kubus::{Configuration, RowRecord};
use std::io::sink;
use std::sync::Arc;
use std::time::Instant;

const SAMPLE_ROWS: usize = 100;

fn generate_rows(number_rows: u64) -> Vec<RowRecord> {
    let header = Arc::new(
        ["kode_provinsi", "kode_kabkota", "tahun", "bulan", "jumlah_penduduk", "luas_wilayah", "kategori"]
            .iter()
            .map(|c| (*c).to_string())
            .collect::<Vec<_>>(),
    );

    (0..number_rows)
        .map(|i| {
            let province = 11 + (i % 34);
            let values = vec![
                province.to_string(),
                format!("{}{:02}", province, i % 30),
                (2000 + i % 20).to_string(),
                (1 + i % 12).to_string(),
                (10_000 + i * 7).to_string(),
                format!("{}.{}", i % 5000, i % 100),
                if i % 2 == 0 { "kabupaten" } else { "kota" }.to_string(),
            ];
            RowRecord::new(Arc::clone(&header), values)
        })
        .collect()
}

/// Encode every row and serialize the triples to N-Triples, discarding the output
fn benchmark_encoding(rows: &[RowRecord]) -> kubus::Result<(f64, u64)> {
    let config = Configuration::new("benchmark").validated()?;
    let schema = infer_schema_from_sample(&rows[..SAMPLE_ROWS.min(rows.len())], &config)?;
    let encoder = ObservationEncoder::new(&config, &schema)?;
    let mut out = sink();

    let start = Instant::now();
    let mut triples = 0u64;
    for (i, row) in rows.iter().enumerate() {
        for triple in encoder.encode(row, i as u64 + 1)? {
            write_ntriples_line(&mut out, &triple)?;
            triples += 1;
        }
    }
    Ok((start.elapsed().as_secs_f64(), triples))
}

fn main() -> kubus::Result<()> {
    println!("Observation Encoding Benchmark");
    println!("==============================\n");

    for number_rows in [10_000u64, 100_000, 1_000_000] {
        let rows = generate_rows(number_rows);
        let (seconds, triples) = benchmark_encoding(&rows)?;
        println!(
            "{:>9} rows: {:>10} triples in {:.3} s ({:.0} rows/s, {:.0} triples/s)",
            number_rows,
            triples,
            seconds,
            number_rows as f64 / seconds,
            triples as f64 / seconds
        );
    }
    Ok(())
}
