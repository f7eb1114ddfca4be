//! Regional fair-market benchmark table keyed by billing code.
//!
//! Static reference data: Pennsylvania regional averages for common
//! CPT/HCPCS procedure codes. A heuristic table, not an exhaustive or
//! learned model. Every entry uses a code shape the auditor scans for
//! (five digits starting with 9, or four digits plus a letter); an
//! entry outside those shapes could never be matched against text.

use audit_types::BenchmarkEntry;

pub const BENCHMARKS: &[BenchmarkEntry] = &[
    // Office visits, established patient
    BenchmarkEntry { code: "99212", average_cost: 55.0, label: "Office visit, established patient (level 2)" },
    BenchmarkEntry { code: "99213", average_cost: 75.0, label: "Office visit, established patient (level 3)" },
    BenchmarkEntry { code: "99214", average_cost: 110.0, label: "Office visit, established patient (level 4)" },
    BenchmarkEntry { code: "99215", average_cost: 148.0, label: "Office visit, established patient (level 5)" },
    // Office visits, new patient
    BenchmarkEntry { code: "99203", average_cost: 109.0, label: "Office visit, new patient (level 3)" },
    BenchmarkEntry { code: "99204", average_cost: 167.0, label: "Office visit, new patient (level 4)" },
    // Emergency department
    BenchmarkEntry { code: "99283", average_cost: 350.0, label: "Emergency dept visit (level 3)" },
    BenchmarkEntry { code: "99284", average_cost: 620.0, label: "Emergency dept visit (level 4)" },
    BenchmarkEntry { code: "99285", average_cost: 880.0, label: "Emergency dept visit (level 5)" },
    // Hospital care
    BenchmarkEntry { code: "99232", average_cost: 73.0, label: "Subsequent hospital care (level 2)" },
    BenchmarkEntry { code: "99238", average_cost: 74.0, label: "Hospital discharge management" },
    // Cardiology
    BenchmarkEntry { code: "93000", average_cost: 25.0, label: "Electrocardiogram with interpretation" },
    BenchmarkEntry { code: "93306", average_cost: 230.0, label: "Echocardiogram, complete" },
    // Pulmonary
    BenchmarkEntry { code: "94010", average_cost: 55.0, label: "Spirometry" },
    // Behavioral health
    BenchmarkEntry { code: "90834", average_cost: 140.0, label: "Psychotherapy, 45 minutes" },
    // Ophthalmology
    BenchmarkEntry { code: "92014", average_cost: 125.0, label: "Eye exam, established patient" },
    // Injections and immunization
    BenchmarkEntry { code: "90471", average_cost: 28.0, label: "Immunization administration" },
    BenchmarkEntry { code: "96372", average_cost: 32.0, label: "Therapeutic injection" },
    // Category III / PLA shaped codes (4 digits + letter)
    BenchmarkEntry { code: "0042T", average_cost: 265.0, label: "Cerebral perfusion analysis" },
    BenchmarkEntry { code: "0001U", average_cost: 185.0, label: "Red blood cell antigen typing" },
    BenchmarkEntry { code: "0202U", average_cost: 240.0, label: "Respiratory pathogen panel" },
];

/// Looks up a billing code in the benchmark table.
pub fn lookup(code: &str) -> Option<&'static BenchmarkEntry> {
    BENCHMARKS.iter().find(|entry| entry.code == code)
}
