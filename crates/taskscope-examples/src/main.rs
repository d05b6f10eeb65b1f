//! Run the observability demo flow (one flow per file under `flows`).

mod flows;
mod milvus;

use taskscope_core::observability::init_observability;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_observability();

    println!("=== Demo: observability flow (add, block consumer, designed failure) ===\n");
    let outcome = flows::observability_demo_flow()?;
    println!("{}\n", outcome);

    Ok(())
}
