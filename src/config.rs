use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub pdf_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let pdf_dir = env::var("PDF_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("appointment_pdfs"));

        Self { bind_addr, pdf_dir }
    }
}
