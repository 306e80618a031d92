//! Shared test documents.

use edm_types::Document;

const CVR_REPORT: &str = include_str!("../testdata/cvr_report.json");

/// Cast vote record report for a small county election: two ballots, two
/// contests, three geopolitical units, two parties.
pub fn cvr_report() -> Document {
    Document::from_json_str(CVR_REPORT).expect("testdata/cvr_report.json is a valid document")
}

/// Bare type names of [`cvr_report`] with their counts, in first-encounter order.
pub const CVR_TYPE_COUNTS: &[(&str, usize)] = &[
    ("CVR", 2),
    ("CVRSnapshot", 2),
    ("CVRContest", 3),
    ("CVRContestSelection", 3),
    ("SelectionPosition", 3),
    ("CVRWriteIn", 1),
    ("Election", 1),
    ("Candidate", 2),
    ("CandidateContest", 1),
    ("CandidateSelection", 3),
    ("BallotMeasureContest", 1),
    ("BallotMeasureSelection", 2),
    ("GpUnit", 3),
    ("Party", 2),
    ("ReportingDevice", 1),
];

/// Identifiers of [`cvr_report`], in first-encounter order.
pub const CVR_IDS: &[&str] = &[
    "snapshot-01",
    "snapshot-02",
    "gadget-county-2021-06",
    "candidate-cosmo-spacely",
    "candidate-spencer-cogswell",
    "contest-mayor-orbit-city",
    "contest-mayor--selection-cosmo-spacely",
    "contest-mayor--selection-spencer-cogswell",
    "contest-mayor--selection-write-in",
    "contest-ballot-measure-gadget-county-1",
    "contest-ballot-measure-1--selection-yes",
    "contest-ballot-measure-1--selection-no",
    "gadget-county",
    "downtown-precinct",
    "port-precinct",
    "party-hadron",
    "party-lepton",
    "ballot-marker-1",
];

/// Election results report using the `ElectionResults` namespace.
pub const EDF_REPORT: &str = r#"{
    "@type": "ElectionResults.ElectionReport",
    "Election": [
        {
            "@id": "recall-election",
            "@type": "ElectionResults.Election",
            "Candidate": [
                {
                    "@id": "candidate-1",
                    "@type": "ElectionResults.Candidate",
                    "BallotName": { "Text": [] },
                    "PersonId": "person-1"
                },
                {
                    "@id": "candidate-2",
                    "@type": "ElectionResults.Candidate",
                    "PersonId": "person-2"
                }
            ],
            "ElectionScopeId": "state-of-tennessee"
        }
    ],
    "Format": "summary-contest",
    "Person": [
        { "@id": "person-1", "@type": "ElectionResults.Person", "FirstName": "Rosa" },
        { "@id": "person-2", "@type": "ElectionResults.Person", "FirstName": "Vic" }
    ],
    "GpUnit": [
        { "@id": "state-of-tennessee", "@type": "ElectionResults.GpUnit", "Type": "state" }
    ]
}"#;
