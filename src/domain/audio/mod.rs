//! Audio - PCM 与 WAV 容器
//!
//! 外部 TTS 返回裸 PCM，这里负责封装为可播放的 WAV

mod wav;

pub use wav::{encode_wav, parse_wav, PcmFormat, WavError, WavInfo, WAV_HEADER_LEN};
