fn main() {
    // Build-time configuration consumed through option_env!().
    for var in ["WIFI_SSID", "WIFI_PASS", "LDR_THRESHOLD", "MQ_THRESHOLD", "HTTP_PORT"] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
