//! Training dataset export.
//!
//! Writes `training_data.json` (pretty JSON with metadata) and
//! `finetune_dataset.jsonl` (one chat-format record per line).

use serde::Serialize;
use std::path::{Path, PathBuf};
use tape_core::training::{
    TrainingCategory, TrainingExample, count_valid, fine_tune_record, generate_examples,
};
use tape_core::{Result, TapeError};

use crate::storage::AtomicFile;

pub const TRAINING_DATA_FILE: &str = "training_data.json";
pub const FINETUNE_DATASET_FILE: &str = "finetune_dataset.jsonl";

#[derive(Debug, Serialize)]
struct TrainingMetadata {
    total_examples: usize,
    valid_examples: usize,
    basic_shapes: usize,
    advanced_objects: usize,
    created: String,
}

#[derive(Debug, Serialize)]
struct TrainingData<'a> {
    metadata: TrainingMetadata,
    examples: &'a [TrainingExample],
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub examples: usize,
    pub valid: usize,
    pub training_data: PathBuf,
    pub finetune_dataset: PathBuf,
}

/// Generates the dataset and writes both files into `dir`.
pub fn export_training(dir: &Path) -> Result<ExportSummary> {
    let examples = generate_examples();
    let valid = count_valid(&examples);
    if valid != examples.len() {
        return Err(TapeError::internal(format!(
            "{} of {} generated examples failed validation",
            examples.len() - valid,
            examples.len()
        )));
    }

    let count = |category| examples.iter().filter(|e| e.category == category).count();
    let data = TrainingData {
        metadata: TrainingMetadata {
            total_examples: examples.len(),
            valid_examples: valid,
            basic_shapes: count(TrainingCategory::BasicShapes),
            advanced_objects: count(TrainingCategory::AdvancedObjects),
            created: chrono::Utc::now().to_rfc3339(),
        },
        examples: &examples,
    };

    let training_data = dir.join(TRAINING_DATA_FILE);
    AtomicFile::new(training_data.clone()).save(&serde_json::to_string_pretty(&data)?)?;

    let mut lines = String::new();
    for example in &examples {
        lines.push_str(&serde_json::to_string(&fine_tune_record(example))?);
        lines.push('\n');
    }
    let finetune_dataset = dir.join(FINETUNE_DATASET_FILE);
    AtomicFile::new(finetune_dataset.clone()).save(&lines)?;

    tracing::info!(
        examples = examples.len(),
        dir = %dir.display(),
        "Exported training data"
    );

    Ok(ExportSummary {
        examples: examples.len(),
        valid,
        training_data,
        finetune_dataset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tape_core::training::FineTuneRecord;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_both_files() {
        let temp_dir = TempDir::new().unwrap();
        let summary = export_training(temp_dir.path()).unwrap();
        assert_eq!(summary.examples, summary.valid);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&summary.training_data).unwrap())
                .unwrap();
        assert_eq!(json["metadata"]["total_examples"], summary.examples);
        assert_eq!(json["examples"][0]["category"], "basic_shapes");

        let jsonl = std::fs::read_to_string(&summary.finetune_dataset).unwrap();
        let records: Vec<FineTuneRecord> = jsonl
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), summary.examples);
        assert_eq!(records[0].messages.len(), 3);
    }
}
