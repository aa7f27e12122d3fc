//! Per-note event transform.

use tripsaber_format::{EventType, MappingConfig, OutputEvent, SourceNote};

use crate::beat::split_beat;
use crate::error::ConvertError;
use crate::layout::LaneLayout;
use crate::rng::JitterStream;

/// Maps a source color to a gem type: color 0 is the left gem, anything
/// else the right gem.
pub fn event_type_for_color(color: i64) -> EventType {
    if color == 0 {
        EventType::LeftGem
    } else {
        EventType::RightGem
    }
}

/// Converts one source note into an output event.
///
/// Draws exactly one sample from `jitter`, so calls must follow source note
/// order for the layout to be reproducible.
///
/// # Arguments
/// * `note` - The source note
/// * `config` - Mapping configuration (only `beats_per_measure` is read here)
/// * `layout` - Lane table built from the same config
/// * `jitter` - The document's jitter stream
pub fn transform_note(
    note: &SourceNote,
    config: &MappingConfig,
    layout: &LaneLayout,
    jitter: &mut JitterStream,
) -> Result<OutputEvent, ConvertError> {
    let time = split_beat(note.beat, config.beats_per_measure)?;
    let sample = jitter.next_sample();
    let position = layout.position(note.lane_column, note.lane_row, sample)?;

    Ok(OutputEvent::gem(
        event_type_for_color(note.color),
        time,
        position,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::JitterSample;

    fn note(beat: f64, column: i64, row: i64, color: i64) -> SourceNote {
        SourceNote {
            beat,
            lane_column: column,
            lane_row: row,
            color,
        }
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(event_type_for_color(0), EventType::LeftGem);
        assert_eq!(event_type_for_color(0).code(), 1);
        assert_eq!(event_type_for_color(1), EventType::RightGem);
        assert_eq!(event_type_for_color(1).code(), 2);
        assert_eq!(event_type_for_color(7), EventType::RightGem);
    }

    #[test]
    fn test_transform_uses_one_sample() {
        let config = MappingConfig::default();
        let layout = LaneLayout::new(&config);
        let mut jitter = JitterStream::new(11);
        let mut reference = JitterStream::new(11);

        let event = transform_note(&note(5.5, 1, 2, 0), &config, &layout, &mut jitter).unwrap();
        let expected = layout.position(1, 2, reference.next_sample()).unwrap();

        assert_eq!(event.position, expected);
        assert_eq!(event.event_type, EventType::LeftGem);
        assert_eq!(
            (event.time.beat, event.time.numerator, event.time.denominator),
            (5, 1, 2)
        );
        assert!(!event.has_guide);
        assert_eq!(event.beat_division, 2);
        assert!(event.sub_positions.is_empty());
        assert_eq!(event.broadcast_event_id, 0);

        // Both streams are now at the same cursor
        assert_eq!(jitter.next_sample(), reference.next_sample());
    }

    #[test]
    fn test_zero_wobble_lands_on_centre() {
        let config = MappingConfig {
            x_range: 2.5,
            y_range: 1.5,
            y_min: 0.3,
            x_wobble_factor: 0.0,
            y_wobble_factor: 0.0,
            ..MappingConfig::default()
        };
        let layout = LaneLayout::new(&config);
        let mut jitter = JitterStream::new(0);

        let event = transform_note(&note(5.0, 0, 0, 1), &config, &layout, &mut jitter).unwrap();
        let centre = layout.position(0, 0, JitterSample::ZERO).unwrap();
        assert_eq!(event.position, centre);
        assert_eq!(event.event_type, EventType::RightGem);
    }

    #[test]
    fn test_errors_propagate() {
        let config = MappingConfig::default();
        let layout = LaneLayout::new(&config);
        let mut jitter = JitterStream::new(0);

        assert!(matches!(
            transform_note(&note(1.0, 4, 0, 0), &config, &layout, &mut jitter),
            Err(ConvertError::OutOfRange { column: 4, row: 0 })
        ));
        assert!(matches!(
            transform_note(&note(-1.0, 0, 0, 0), &config, &layout, &mut jitter),
            Err(ConvertError::InvalidBeat(_))
        ));
    }
}
