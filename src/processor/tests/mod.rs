//! Scenario tests for the processor module
//!
//! Tests the complete pipeline against CSV fixtures laid out the way a
//! real run sees them: `<tmp>/solution` as the base directory with
//! `<tmp>/source-data` and `<tmp>/results` beside it.


use crate::models::RaceSummary;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const RACES_HEADER: &str = "raceId,year,round,circuitId,name,date,time,url";
pub const RESULTS_HEADER: &str = "resultId,raceId,driverId,constructorId,number,grid,position,positionText,points,laps,time,fastestLap,fastestLapTime";

/// Temporary directory tree holding one run's inputs and outputs
pub struct Fixture {
    pub temp_dir: TempDir,
    pub base_dir: PathBuf,
}

impl Fixture {
    /// Create the layout with the given CSV bodies (header lines included)
    pub fn new(races_csv: &str, results_csv: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let base_dir = temp_dir.path().join("solution");
        let source_dir = temp_dir.path().join("source-data");

        fs::create_dir_all(&base_dir).unwrap();
        fs::create_dir_all(&source_dir).unwrap();
        fs::write(source_dir.join("races.csv"), races_csv).unwrap();
        fs::write(source_dir.join("results.csv"), results_csv).unwrap();

        Self { temp_dir, base_dir }
    }

    /// Standard fixture covering three seasons
    pub fn seasons() -> Self {
        Self::new(&seasons_races_csv(), &seasons_results_csv())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.temp_dir.path().join("results")
    }

    pub fn document_path(&self, year: i64) -> PathBuf {
        self.output_dir().join(format!("stats_{year}.json"))
    }

    pub fn read_document(&self, year: i64) -> Vec<RaceSummary> {
        let text = fs::read_to_string(self.document_path(year)).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    /// Years of the documents currently in the output directory
    pub fn output_years(&self) -> Vec<i64> {
        output_years_in(&self.output_dir())
    }
}

pub fn output_years_in(dir: &Path) -> Vec<i64> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut years: Vec<i64> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            name.strip_prefix("stats_")?
                .strip_suffix(".json")?
                .parse()
                .ok()
        })
        .collect();
    years.sort();
    years
}

/// Races across 2019-2021, deliberately out of order, with missing times
pub fn seasons_races_csv() -> String {
    [
        RACES_HEADER,
        "5,2021,2,2,Emilia Romagna Grand Prix,2021-04-18,13:00:00,http://example.com/5",
        "4,2021,1,1,Bahrain Grand Prix,2021-03-28,15:00:00,http://example.com/4",
        "1,2019,1,1,Australian Grand Prix,2019-03-17,05:10:00,http://example.com/1",
        "3,2020,2,3,Styrian Grand Prix,2020-07-12,\\N,http://example.com/3",
        "2,2020,1,3,Austrian Grand Prix,2020-07-05,13:10:00,http://example.com/2",
        "6,2021,3,4,Portuguese Grand Prix,2021-05-02,14:00:00,http://example.com/6",
    ]
    .join("\n")
        + "\n"
}

/// Podium results for most races; race 6 has no results yet
pub fn seasons_results_csv() -> String {
    [
        RESULTS_HEADER,
        "1,1,822,131,77,1,1,1,26,58,1:25:27.325,57,1:26.057",
        "2,1,1,131,44,2,2,2,18,58,+20.886,58,1:26.428",
        "3,1,830,9,33,4,3,3,15,58,+22.520,57,1:26.256",
        "4,2,822,131,77,1,1,1,25,71,1:30:55.739,66,1:07.657",
        "5,2,844,6,16,7,2,2,18,71,+2.700,70,\\N",
        "6,2,846,1,4,3,3,3,16,71,+5.491,71,1:07.475",
        "7,3,1,131,44,1,1,1,25,71,1:22:50.683,\\N,\\N",
        "8,3,822,131,77,4,2,2,18,71,+13.719,71,1:06.719",
        "9,4,1,131,44,2,1,1,25,56,1:32:03.897,44,1:34.015",
        "10,4,830,9,33,1,2,2,18,56,+0.745,41,1:33.228",
        "11,5,830,9,33,3,1,1,25,63,2:02:34.598,60,1:16.702",
        "12,5,1,131,44,1,2,2,19,63,+22.000,60,1:16.702",
        "13,5,817,1,3,6,\\N,R,0,30,\\N,29,1:20.000",
        "14,99,1,131,44,1,1,1,25,50,1:30:00.000,40,1:20.000",
    ]
    .join("\n")
        + "\n"
}
