#[cfg(target_arch = "wasm32")]
fn main() {
    // Trunk builds call main; wasm-pack uses the #[wasm_bindgen(start)]
    // entry in lib.rs. Both initialize the same way.
    resource_hub_frontend::start();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("resource-hub-frontend is a WASM application; build it for wasm32.");
}
