use ptable_gpt::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("Please provide at least {needed} bytes of input, got {actual}")]
    Input { needed: u64, actual: u64 },

    #[error("{0} is too large to address")]
    Overflow(&'static str),

    #[error("Invalid MBR, signature: 0x{0:X} is not correct.")]
    MbrSignature(u16),

    #[error("Invalid GPT Header, signature: 0x{0} is not correct.")]
    GptSignature(String),
}
