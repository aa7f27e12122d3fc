//! Audio duration probing.
//!
//! Beat Saber ships Ogg Vorbis audio (usually with an `.egg` extension). The
//! duration is the granule position of the last page divided by the sample
//! rate from the Vorbis identification header; no audio is decoded. WAV files
//! are read through `hound`.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::ConvertError;

/// Ogg page capture pattern.
const OGG_MAGIC: &[u8; 4] = b"OggS";

/// Fixed part of an Ogg page header, before the segment table.
const OGG_HEADER_LEN: usize = 27;

/// Returns the duration of an audio file in seconds.
///
/// Dispatches on the file extension: `ogg`/`egg` are parsed as Ogg Vorbis,
/// `wav` through hound.
///
/// # Errors
/// `AudioProbe` for unknown extensions or unreadable audio, `IoError` if the
/// file cannot be read.
pub fn probe_duration(path: &Path) -> Result<f64, ConvertError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("ogg") | Some("egg") => {
            let data = fs::read(path)?;
            ogg_vorbis_duration(&data).map_err(|reason| ConvertError::audio_probe(path, reason))
        }
        Some("wav") => {
            let data = fs::read(path)?;
            wav_duration(&data).map_err(|reason| ConvertError::audio_probe(path, reason))
        }
        other => Err(ConvertError::audio_probe(
            path,
            format!("unsupported audio extension: {}", other.unwrap_or("<none>")),
        )),
    }
}

/// Duration of an in-memory Ogg Vorbis stream.
///
/// Only the first logical bitstream is considered.
pub fn ogg_vorbis_duration(data: &[u8]) -> Result<f64, String> {
    let mut cursor = Cursor::new(data);
    let mut stream_serial: Option<u32> = None;
    let mut sample_rate: Option<u32> = None;
    let mut last_granule: Option<i64> = None;

    while (cursor.position() as usize) < data.len() {
        let page_start = cursor.position() as usize;
        if data.len() - page_start < OGG_HEADER_LEN {
            return Err(format!("truncated Ogg page header at byte {}", page_start));
        }

        let mut magic = [0u8; 4];
        cursor.read_exact(&mut magic).map_err(truncated)?;
        if &magic != OGG_MAGIC {
            return Err(format!("missing Ogg capture pattern at byte {}", page_start));
        }
        let _version = cursor.read_u8().map_err(truncated)?;
        let _header_type = cursor.read_u8().map_err(truncated)?;
        let granule = cursor.read_i64::<LittleEndian>().map_err(truncated)?;
        let serial = cursor.read_u32::<LittleEndian>().map_err(truncated)?;
        let _sequence = cursor.read_u32::<LittleEndian>().map_err(truncated)?;
        let _checksum = cursor.read_u32::<LittleEndian>().map_err(truncated)?;
        let segment_count = cursor.read_u8().map_err(truncated)? as usize;

        let mut segment_table = vec![0u8; segment_count];
        cursor.read_exact(&mut segment_table).map_err(truncated)?;
        let payload_len: usize = segment_table.iter().map(|&s| s as usize).sum();

        let payload_start = cursor.position() as usize;
        let payload_end = payload_start + payload_len;
        if payload_end > data.len() {
            return Err(format!("truncated Ogg page body at byte {}", payload_start));
        }
        let payload = &data[payload_start..payload_end];

        let first_serial = *stream_serial.get_or_insert(serial);
        if serial == first_serial {
            if sample_rate.is_none() {
                sample_rate = Some(vorbis_sample_rate(payload)?);
            }
            // -1 marks a page on which no packet ends
            if granule >= 0 {
                last_granule = Some(granule);
            }
        }

        cursor.set_position(payload_end as u64);
    }

    let sample_rate = sample_rate.ok_or("no Vorbis identification header")?;
    let granule = last_granule.ok_or("no Ogg page with a granule position")?;
    Ok(granule as f64 / f64::from(sample_rate))
}

/// Reads the sample rate from a Vorbis identification header packet.
fn vorbis_sample_rate(packet: &[u8]) -> Result<u32, String> {
    // type(1) "vorbis"(6) version(4) channels(1) rate(4)
    if packet.len() < 16 || packet[0] != 1 || &packet[1..7] != b"vorbis" {
        return Err("first Ogg packet is not a Vorbis identification header".to_string());
    }
    let mut cursor = Cursor::new(&packet[12..16]);
    let rate = cursor.read_u32::<LittleEndian>().map_err(truncated)?;
    if rate == 0 {
        return Err("Vorbis sample rate is zero".to_string());
    }
    Ok(rate)
}

/// Duration of an in-memory WAV file.
pub fn wav_duration(data: &[u8]) -> Result<f64, String> {
    let reader = hound::WavReader::new(Cursor::new(data))
        .map_err(|e| format!("failed to read WAV header: {}", e))?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err("WAV sample rate is zero".to_string());
    }
    Ok(f64::from(reader.duration()) / f64::from(spec.sample_rate))
}

fn truncated(e: std::io::Error) -> String {
    format!("truncated Ogg data: {}", e)
}
