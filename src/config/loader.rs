//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading school
//! profiles and seed data from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::models::School;
use crate::repository::{InMemoryRepository, SchoolRepository};

use super::types::{SchoolProfile, SeedData};

/// Loads and provides access to school configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── schools/
/// │   ├── sch_001.yaml   # One profile per school
/// │   └── sch_002.yaml
/// └── seed.yaml          # Optional staff and fee accounts
/// ```
///
/// # Example
///
/// ```no_run
/// use bursar_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// for school in loader.schools() {
///     println!("{} ({})", school.name, school.currency);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    schools: Vec<School>,
    seed: SeedData,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if the `schools` directory is missing or empty, if any file
    /// contains invalid YAML, or if a school's payroll settings are invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let schools = Self::load_schools(&path.join("schools"))?;

        let seed_path = path.join("seed.yaml");
        let seed = if seed_path.exists() {
            Self::load_yaml::<SeedData>(&seed_path)?
        } else {
            SeedData::default()
        };

        Ok(Self { schools, seed })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every school profile, ordered by file name.
    fn load_schools(schools_dir: &Path) -> EngineResult<Vec<School>> {
        let schools_dir_str = schools_dir.display().to_string();

        let entries = fs::read_dir(schools_dir).map_err(|_| EngineError::ConfigNotFound {
            path: schools_dir_str.clone(),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: schools_dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no school profiles found)", schools_dir_str),
            });
        }

        let mut schools = Vec::with_capacity(paths.len());
        for path in paths {
            let profile = Self::load_yaml::<SchoolProfile>(&path)?;
            profile
                .payroll
                .validate()
                .map_err(|e| EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            schools.push(School::from(profile));
        }

        Ok(schools)
    }

    /// The loaded schools, ordered by file name.
    pub fn schools(&self) -> &[School] {
        &self.schools
    }

    /// Gets a school by id.
    pub fn school(&self, school_id: &str) -> EngineResult<&School> {
        self.schools
            .iter()
            .find(|s| s.id == school_id)
            .ok_or_else(|| EngineError::SchoolNotFound {
                school_id: school_id.to_string(),
            })
    }

    /// The seed data, empty when no `seed.yaml` exists.
    pub fn seed(&self) -> &SeedData {
        &self.seed
    }

    /// Builds an in-memory repository holding the schools and seed data.
    ///
    /// Fails if seed data refers to a school without a profile.
    pub fn into_repository(self) -> EngineResult<InMemoryRepository> {
        let repository = InMemoryRepository::new();

        for school in self.schools {
            repository.insert_school(school)?;
        }
        for member in self.seed.members {
            repository.insert_member(member)?;
        }
        for account in self.seed.student_accounts {
            repository.insert_student_account(account)?;
        }

        Ok(repository)
    }
}
