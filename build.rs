fn main() {
    println!("cargo:rerun-if-env-changed=CHARGEGUARD_CONFIG");
    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASS");

    // Host builds (library + tests) have no ESP-IDF environment to export.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
