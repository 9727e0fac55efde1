#[derive(Debug, thiserror::Error)]
pub enum IcmError {
    #[error("Unexpected end of file while reading {what}")]
    Truncated { what: &'static str },
    #[error("Brightness {brightness} is out of range. Expect 0 to 9")]
    BrightnessOutOfRange { brightness: u8 },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
