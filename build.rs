#[cfg(feature = "headers")]
fn generate_headers() {
    use std::env;
    use std::path::PathBuf;

    let crate_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let out = PathBuf::from(&crate_dir).join("include").join("header.h");
    let config = cbindgen::Config {
        language: cbindgen::Language::C,
        cpp_compat: true,
        ..Default::default()
    };
    cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_config(config)
        .generate()
        .expect("Unable to generate bindings")
        .write_to_file(out);
}

fn main() {
    #[cfg(feature = "headers")]
    generate_headers();
}
