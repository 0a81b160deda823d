//! Entry point for the WASM application, built by trunk

pub fn main() {
    checkin_frontend::start();
}
