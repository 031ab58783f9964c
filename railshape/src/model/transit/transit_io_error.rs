#[derive(thiserror::Error, Debug)]
pub enum TransitIoError {
    #[error("failure reading '{0}': {1}")]
    CsvReadError(String, csv::Error),
    #[error("failure writing '{0}': {1}")]
    CsvWriteError(String, csv::Error),
    #[error("'{0}' is missing required column '{1}'")]
    MissingColumn(String, String),
    #[error("station '{0}' appears more than once in '{1}'")]
    DuplicateStation(String, String),
    #[error("unable to create directory '{0}': {1}")]
    DirectoryError(String, std::io::Error),
    #[error("failure writing '{0}': {1}")]
    IoError(String, std::io::Error),
}
