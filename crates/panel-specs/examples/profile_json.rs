//! Serde Serialization Example
//!
//! Dumps a panel profile as JSON, e.g. for comparing init sequences.
//!
//! Run with: cargo run --example profile_json --features serde

#[cfg(feature = "serde")]
fn main() {
    use panel_specs::displays::ILI9488_SX035HV006;

    let json = serde_json::to_string_pretty(&ILI9488_SX035HV006).unwrap();
    println!("Serialized PanelProfile:");
    println!("{}", json);
}

#[cfg(not(feature = "serde"))]
fn main() {
    println!("This example requires the 'serde' feature.");
    println!("Run with: cargo run --example profile_json --features serde");
}
