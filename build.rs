use std::env;

fn main() {
    // Only the ESP-IDF firmware build needs the linker arguments from esp-idf-sys
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
