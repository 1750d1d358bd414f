//! OpenAPI Specification Generator Binary
//!
//! Prints the convo OpenAPI document as JSON to stdout.
//! Used by SDK generation scripts to create client libraries.
//!
//! Usage:
//!   cargo run -p convo-api --bin generate-openapi > openapi.json

fn main() {
    match convo_api::openapi::render_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize OpenAPI spec: {}", e);
            std::process::exit(1);
        }
    }
}
