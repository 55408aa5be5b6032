//! Trajectory text files and the projection of arbitrary numeric tables onto
//! the unified `id fr x y z` layout.
//!
//! Files written here are tab-delimited with CR-LF line endings and a header
//! line starting with `#`, integers for `id`/`fr` and four decimals for every
//! real column.

use crate::error::Error;
use crate::sample::{KinematicSample, Sample};
use crate::table::TrajectoryTable;
use ndarray::{Array2, ArrayView2};
use serde_derive::{Deserialize, Serialize};
use std::io::{BufRead, Write};

pub const TRAJECTORY_HEADER: &str = "#id\tfr\tx\ty\tz";
pub const RESULT_HEADER: &str = "#id\tfr\tx\ty\tz\tvelocity\theadway\trho";

/// Column indices of a raw trajectory table. `id`, `x` and `y` are
/// mandatory, a missing `frame` is synthesized, a missing `z` is zero.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnLayout {
    pub id: Option<usize>,
    pub frame: Option<usize>,
    pub x: Option<usize>,
    pub y: Option<usize>,
    pub z: Option<usize>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            id: Some(0),
            frame: Some(1),
            x: Some(2),
            y: Some(3),
            z: Some(4),
        }
    }
}

/// Meaning of the frame column
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Temporal {
    #[default]
    Frames,
    /// Time stamps in seconds, converted to frames with the frame rate
    Seconds,
}

/// How the first lines of a raw file are laid out
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Header {
    None,
    /// Header lines start with `#`
    #[default]
    Commented,
    /// The first line is an uncommented header
    FirstRow,
}

/// Row of the relational trajectory store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelationalRow {
    pub frame: i64,
    pub id: u32,
    pub pos_x: f64,
    pub pos_y: f64,
    pub orientation_x: f64,
    pub orientation_y: f64,
}

fn in_range(idx: Option<usize>, width: usize) -> Result<Option<usize>, Error> {
    match idx {
        Some(idx) if idx >= width => Err(Error::ColumnOutOfRange { column: idx, width }),
        idx => Ok(idx),
    }
}

fn pedestrian_id(value: f64, row: usize) -> Result<u32, Error> {
    if value >= 0.0 && value <= u32::MAX as f64 {
        Ok(value.round() as u32)
    } else {
        Err(Error::Parse {
            line: row + 1,
            message: format!("invalid pedestrian id {}", value),
        })
    }
}

/// Projects a raw table onto the unified layout.
///
/// Fails before touching any row if a mandatory column is not specified.
pub fn unify(
    raw: ArrayView2<f64>,
    layout: &ColumnLayout,
    temporal: Temporal,
    fps: f64,
) -> Result<TrajectoryTable, Error> {
    let id_col = layout.id.ok_or(Error::MissingColumn("id"))?;
    let x_col = layout.x.ok_or(Error::MissingColumn("x"))?;
    let y_col = layout.y.ok_or(Error::MissingColumn("y"))?;

    if raw.nrows() == 0 {
        return Ok(TrajectoryTable::default());
    }

    let width = raw.ncols();
    for idx in [id_col, x_col, y_col] {
        in_range(Some(idx), width)?;
    }
    let fr_col = in_range(layout.frame, width)?;
    let z_col = in_range(layout.z, width)?;

    let mut samples = Vec::with_capacity(raw.nrows());
    for (idx, row) in raw.rows().into_iter().enumerate() {
        let frame = match fr_col {
            Some(c) => match temporal {
                Temporal::Frames => row[c].round() as i64,
                Temporal::Seconds => (row[c] * fps).round() as i64,
            },
            None => 0,
        };

        samples.push(Sample::new(
            pedestrian_id(row[id_col], idx)?,
            frame,
            row[x_col],
            row[y_col],
            z_col.map(|c| row[c]).unwrap_or(0.0),
        ));
    }

    if fr_col.is_none() {
        // frames count up per pedestrian along its walking direction
        samples.sort_by(|a, b| a.id.cmp(&b.id).then(a.x.total_cmp(&b.x)));

        let mut prev_id = None;
        let mut frame = 0;
        for s in samples.iter_mut() {
            if prev_id != Some(s.id) {
                prev_id = Some(s.id);
                frame = 0;
            }

            s.frame = frame;
            frame += 1;
        }
    }

    TrajectoryTable::new(samples)
}

/// Projects rows of the relational store; orientations are discarded
pub fn project_relational(rows: &[RelationalRow]) -> Result<TrajectoryTable, Error> {
    let data = rows
        .iter()
        .flat_map(|r| {
            [
                r.frame as f64,
                r.id as f64,
                r.pos_x,
                r.pos_y,
                r.orientation_x,
                r.orientation_y,
            ]
        })
        .collect();

    let raw = Array2::from_shape_vec((rows.len(), 6), data)?;
    let layout = ColumnLayout {
        id: Some(1),
        frame: Some(0),
        x: Some(2),
        y: Some(3),
        z: None,
    };

    unify(raw.view(), &layout, Temporal::Frames, 1.0)
}

/// Reads a numeric text table. Blank lines and lines starting with `#` are
/// skipped, `delimiter = None` splits on whitespace.
pub fn read_raw<R: BufRead>(
    reader: R,
    delimiter: Option<char>,
    header: Header,
) -> Result<Array2<f64>, Error> {
    let mut width = None;
    let mut rows = 0;
    let mut data = Vec::new();
    let mut skip_first = header == Header::FirstRow;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if skip_first {
            skip_first = false;
            continue;
        }

        let before = data.len();
        let tokens: Box<dyn Iterator<Item = &str> + '_> = match delimiter {
            Some(d) => Box::new(line.split(d).map(str::trim)),
            None => Box::new(line.split_whitespace()),
        };

        for token in tokens {
            let value = token.parse::<f64>().map_err(|e| Error::Parse {
                line: idx + 1,
                message: format!("`{}`: {}", token, e),
            })?;

            data.push(value);
        }

        let count = data.len() - before;
        match width {
            None => width = Some(count),
            Some(w) if w != count => {
                return Err(Error::Parse {
                    line: idx + 1,
                    message: format!("expected {} columns, found {}", w, count),
                })
            }
            _ => (),
        }

        rows += 1;
    }

    Ok(Array2::from_shape_vec((rows, width.unwrap_or(0)), data)?)
}

/// Reads a file in the unified `id fr x y z` layout
pub fn read_trajectories<R: BufRead>(
    reader: R,
    delimiter: Option<char>,
) -> Result<TrajectoryTable, Error> {
    let raw = read_raw(reader, delimiter, Header::Commented)?;

    unify(raw.view(), &ColumnLayout::default(), Temporal::Frames, 1.0)
}

pub fn write_trajectories<W: Write>(mut w: W, table: &TrajectoryTable) -> Result<(), Error> {
    write!(w, "{}\r\n", TRAJECTORY_HEADER)?;

    for s in table.iter() {
        write!(
            w,
            "{}\t{}\t{:.4}\t{:.4}\t{:.4}\r\n",
            s.id, s.frame, s.x, s.y, s.z
        )?;
    }

    Ok(w.flush()?)
}

pub fn write_results<W: Write>(mut w: W, rows: &[KinematicSample]) -> Result<(), Error> {
    write!(w, "{}\r\n", RESULT_HEADER)?;

    for r in rows {
        let s = &r.sample;

        write!(
            w,
            "{}\t{}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\r\n",
            s.id, s.frame, s.x, s.y, s.z, r.velocity, r.headway, r.rho
        )?;
    }

    Ok(w.flush()?)
}

/// Reads rows written by [`write_results`]
pub fn read_results<R: BufRead>(reader: R) -> Result<Vec<KinematicSample>, Error> {
    let raw = read_raw(reader, None, Header::Commented)?;

    if raw.nrows() > 0 && raw.ncols() < 8 {
        return Err(Error::ColumnOutOfRange {
            column: 7,
            width: raw.ncols(),
        });
    }

    raw.rows()
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            Ok(KinematicSample {
                sample: Sample::new(
                    pedestrian_id(row[0], idx)?,
                    row[1].round() as i64,
                    row[2],
                    row[3],
                    row[4],
                ),
                velocity: row[5],
                headway: row[6],
                rho: row[7],
            })
        })
        .collect()
}
