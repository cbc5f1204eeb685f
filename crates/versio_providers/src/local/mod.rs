//! Local neural translation: NLLB-200 and OPUS-MT.
//!
//! Both families are encoder-decoder models decoded greedily. The decoding
//! loop in [`Seq2SeqTranslator`] is written against the [`Seq2SeqBackend`] and
//! [`TextCodec`](crate::TextCodec) traits; the `onnx` feature supplies the
//! implementations backed by ONNX Runtime and `tokenizers`.
//!
//! The two families differ only in how the prompt is framed:
//!
//! | Family | Encoder input | Decoder prefix |
//! |--------|---------------|----------------|
//! | NLLB | `[src_lang] text </s>` | `[decoder_start, tgt_lang]` |
//! | OPUS-MT | `text </s>` | `[decoder_start]` |

mod generation;
mod languages;
mod nllb;
mod opus;
mod seq2seq;

pub use generation::{EncoderOutput, GenerationConfig, MAX_LENGTH, Seq2SeqBackend, greedy_decode};
pub use languages::{NLLB_LANGUAGES, flores_code, is_language_code};
pub use nllb::{NllbVariant, load_nllb};
pub use opus::{load_opus, opus_id};
pub use seq2seq::{PromptStyle, Seq2SeqTranslator};
