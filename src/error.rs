use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Shape Error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("required column `{0}` is not specified")]
    MissingColumn(&'static str),

    #[error("column {column} is out of range for a table of width {width}")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error("pedestrian {id} has more than one sample in frame {frame}")]
    DuplicateSample { id: u32, frame: i64 },

    #[error("invalid oval geometry: length = {length}, radius = {radius}")]
    InvalidGeometry { length: f64, radius: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown experiment `{0}`")]
    UnknownExperiment(String),
}
