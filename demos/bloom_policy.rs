//! Example demonstrating the Bloom filter policy
//!
//! Builds one filter per simulated data block, records the policy name the
//! way a table builder would, then probes the filters on the read path.

use aidb_bloom::{FilterOptions, FilterView, PolicyMatcher, Result};

fn main() -> Result<()> {
    env_logger::init();

    println!("=== AiDb Bloom Filter Policy Example ===\n");

    let options = FilterOptions::from_json(r#"{ "policy": "bloom", "bits_per_key": 10 }"#)?;
    let policy = match options.new_policy() {
        Some(policy) => policy,
        None => {
            println!("Filters disabled");
            return Ok(());
        }
    };

    // Table construction: all block filters appended to one buffer
    let blocks: Vec<Vec<String>> = (0..3)
        .map(|block| (0..100).map(|i| format!("user:{}{:03}", block, i)).collect())
        .collect();

    let mut filter_block = Vec::new();
    let mut ranges = Vec::new();
    for keys in &blocks {
        let key_refs: Vec<&[u8]> = keys.iter().map(|k| k.as_bytes()).collect();
        let start = filter_block.len();
        policy.create_filter(&key_refs, &mut filter_block);
        ranges.push(start..filter_block.len());
    }
    let recorded_name = policy.name();

    println!("Policy: {}", recorded_name);
    for (i, range) in ranges.iter().enumerate() {
        let view = FilterView::parse(&filter_block[range.clone()]);
        println!(
            "  block {}: {} bytes, {} bits, {:?} probes",
            i,
            range.len(),
            view.num_bits(),
            view.num_probes()
        );
    }

    // Read path: the matcher must agree with the recorded name
    let matcher = PolicyMatcher::bind(policy, recorded_name)?;

    println!("\nTesting membership:");
    for key in ["user:0007", "user:1042", "user:2099", "user:9000", "order:1"] {
        let hits: Vec<usize> = ranges
            .iter()
            .enumerate()
            .filter(|(_, range)| matcher.key_may_match(key.as_bytes(), &filter_block[(*range).clone()]))
            .map(|(i, _)| i)
            .collect();
        println!("  {} may be in blocks {:?}", key, hits);
    }

    Ok(())
}
