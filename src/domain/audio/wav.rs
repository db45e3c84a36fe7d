//! WAV 容器 - 原始 PCM 的 RIFF/WAVE 封装
//!
//! 只做容器封装，不做重采样或解码：
//! - `encode_wav`: PCM → 最小 WAV（RIFF + fmt + data）
//! - `parse_wav`: 读取 fmt/data chunk，`encode_wav` 的逆操作

use thiserror::Error;

/// RIFF + fmt + data 头部总长度
pub const WAV_HEADER_LEN: usize = 44;

/// WAV 解析错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WavError {
    #[error("WAV data too short")]
    TooShort,

    #[error("Invalid WAV: missing RIFF header")]
    MissingRiff,

    #[error("Invalid WAV: missing WAVE identifier")]
    MissingWave,

    #[error("Invalid WAV: missing fmt chunk")]
    MissingFmt,

    #[error("Invalid WAV: missing data chunk")]
    MissingData,

    #[error("Invalid WAV: {0}")]
    Malformed(String),
}

/// PCM 采样格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    /// 声道数
    pub channels: u16,
    /// 采样率（Hz）
    pub sample_rate: u32,
    /// 位深
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// Gemini TTS 输出格式：单声道 / 16 位 / 24kHz
    pub const GEMINI_TTS: PcmFormat = PcmFormat {
        channels: 1,
        sample_rate: 24_000,
        bits_per_sample: 16,
    };

    /// 每帧字节数
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// 每秒字节数
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// 给定 PCM 字节数的播放时长（毫秒）
    pub fn duration_ms(&self, pcm_len: usize) -> u64 {
        let byte_rate = self.byte_rate() as u64;
        if byte_rate == 0 {
            return 0;
        }
        pcm_len as u64 * 1000 / byte_rate
    }
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self::GEMINI_TTS
    }
}

/// 解析出的 WAV 信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo<'a> {
    pub format: PcmFormat,
    /// data chunk 中的原始 PCM
    pub data: &'a [u8],
}

/// 将原始 PCM 封装为 WAV
///
/// 不校验 `pcm` 长度是否为帧长的整数倍，空缓冲区同样合法。
pub fn encode_wav(pcm: &[u8], format: PcmFormat) -> Vec<u8> {
    let data_size = pcm.len() as u32;
    let pad = pcm.len() % 2;
    let riff_size = 36 + data_size + pad as u32;

    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + pcm.len() + pad);

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&riff_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&format.channels.to_le_bytes());
    wav.extend_from_slice(&format.sample_rate.to_le_bytes());
    wav.extend_from_slice(&format.byte_rate().to_le_bytes());
    wav.extend_from_slice(&format.block_align().to_le_bytes());
    wav.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(pcm);

    // RIFF chunk 按偶数字节对齐
    if pad == 1 {
        wav.push(0);
    }

    wav
}

/// 读取 WAV 的 fmt 与 data chunk
pub fn parse_wav(data: &[u8]) -> Result<WavInfo<'_>, WavError> {
    if data.len() < 12 {
        return Err(WavError::TooShort);
    }
    if &data[0..4] != b"RIFF" {
        return Err(WavError::MissingRiff);
    }
    if &data[8..12] != b"WAVE" {
        return Err(WavError::MissingWave);
    }

    let mut pos = 12;
    let mut format: Option<PcmFormat> = None;

    while pos + 8 <= data.len() {
        let chunk_id = &data[pos..pos + 4];
        let chunk_size = read_u32(data, pos + 4) as usize;
        let body_start = pos + 8;

        match chunk_id {
            b"fmt " => {
                if chunk_size < 16 || body_start + 16 > data.len() {
                    return Err(WavError::Malformed("invalid fmt chunk size".to_string()));
                }
                let audio_format = read_u16(data, body_start);
                if audio_format != 1 {
                    return Err(WavError::Malformed(format!(
                        "unsupported audio format {}",
                        audio_format
                    )));
                }
                format = Some(PcmFormat {
                    channels: read_u16(data, body_start + 2),
                    sample_rate: read_u32(data, body_start + 4),
                    bits_per_sample: read_u16(data, body_start + 14),
                });
            }
            b"data" => {
                let format = format.ok_or(WavError::MissingFmt)?;
                let end = body_start
                    .checked_add(chunk_size)
                    .filter(|end| *end <= data.len())
                    .ok_or_else(|| {
                        WavError::Malformed("data chunk exceeds buffer".to_string())
                    })?;
                return Ok(WavInfo {
                    format,
                    data: &data[body_start..end],
                });
            }
            _ => {}
        }

        pos = body_start + chunk_size + chunk_size % 2;
    }

    if format.is_none() {
        Err(WavError::MissingFmt)
    } else {
        Err(WavError::MissingData)
    }
}

fn read_u16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_pcm(samples: usize) -> Vec<u8> {
        (0..samples)
            .map(|i| ((i as f32 * 0.05).sin() * 12_000.0) as i16)
            .flat_map(|s| s.to_le_bytes())
            .collect()
    }

    #[test]
    fn test_encode_then_parse_returns_samples() {
        let pcm = sine_pcm(2400);
        let wav = encode_wav(&pcm, PcmFormat::GEMINI_TTS);

        let info = parse_wav(&wav).unwrap();
        assert_eq!(info.format.channels, 1);
        assert_eq!(info.format.bits_per_sample, 16);
        assert_eq!(info.format.sample_rate, 24_000);
        assert_eq!(info.data, pcm.as_slice());
    }

    #[test]
    fn test_header_layout() {
        let pcm = sine_pcm(10);
        let wav = encode_wav(&pcm, PcmFormat::GEMINI_TTS);

        assert_eq!(wav.len(), WAV_HEADER_LEN + pcm.len());
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(read_u32(&wav, 4), 36 + pcm.len() as u32);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        // byte rate = 24000 * 1 * 2
        assert_eq!(read_u32(&wav, 28), 48_000);
        assert_eq!(read_u16(&wav, 32), 2);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(read_u32(&wav, 40), pcm.len() as u32);
    }

    #[test]
    fn test_empty_pcm_is_valid() {
        let wav = encode_wav(&[], PcmFormat::GEMINI_TTS);
        assert_eq!(wav.len(), WAV_HEADER_LEN);

        let info = parse_wav(&wav).unwrap();
        assert!(info.data.is_empty());
    }

    #[test]
    fn test_odd_length_pcm_is_padded() {
        let pcm = [1u8, 2, 3];
        let wav = encode_wav(&pcm, PcmFormat::GEMINI_TTS);

        assert_eq!(wav.len(), WAV_HEADER_LEN + 4);
        assert_eq!(read_u32(&wav, 40), 3);
        assert_eq!(parse_wav(&wav).unwrap().data, &pcm);
    }

    #[test]
    fn test_parse_skips_unknown_chunks() {
        let pcm = sine_pcm(4);
        let wav = encode_wav(&pcm, PcmFormat::GEMINI_TTS);

        // 在 fmt 与 data 之间插入一个 LIST chunk
        let mut patched = wav[..36].to_vec();
        patched.extend_from_slice(b"LIST");
        patched.extend_from_slice(&3u32.to_le_bytes());
        patched.extend_from_slice(&[0, 0, 0, 0]);
        patched.extend_from_slice(&wav[36..]);

        assert_eq!(parse_wav(&patched).unwrap().data, pcm.as_slice());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_wav(b"RIFF").unwrap_err(), WavError::TooShort);
        assert_eq!(
            parse_wav(b"RIFX\0\0\0\0WAVEdata").unwrap_err(),
            WavError::MissingRiff
        );
        assert_eq!(
            parse_wav(b"RIFF\0\0\0\0AVI fmt ").unwrap_err(),
            WavError::MissingWave
        );
    }

    #[test]
    fn test_duration() {
        assert_eq!(PcmFormat::GEMINI_TTS.duration_ms(48_000), 1000);
        assert_eq!(PcmFormat::GEMINI_TTS.duration_ms(0), 0);
    }
}
