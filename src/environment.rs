#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Pi,
}

impl Environment {
    pub fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("pi").to_lowercase().as_str() {
            "dev" => Environment::Dev,
            _ => Environment::Pi,
        }
    }
}
