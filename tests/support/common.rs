#![allow(dead_code)]

// Shared report fixtures for the integration suite.

/// A gosec report shaped like `gosec -fmt=json` output: a version header plus
/// a flat `issues` array. G101 appears twice so keyed dedup is exercised.
pub fn sample_gosec_report() -> String {
    r#"{
        "GosecVersion": "2.15.0",
        "issues": [
            {
                "severity": "HIGH",
                "confidence": "LOW",
                "cwe": {"id": "798", "url": "https://cwe.mitre.org/data/definitions/798.html"},
                "rule_id": "G101",
                "details": "Potential hardcoded credentials",
                "file": "config.go",
                "code": "pw := \"hunter2\"",
                "line": "7",
                "column": "12",
                "nosec": false,
                "suppressions": null
            },
            {
                "severity": "MEDIUM",
                "confidence": "HIGH",
                "cwe": {"id": "338", "url": "https://cwe.mitre.org/data/definitions/338.html"},
                "rule_id": "G404",
                "details": "Use of weak random number generator",
                "file": "token.go",
                "code": "rand.Intn(100)",
                "line": "41",
                "column": "9",
                "nosec": false,
                "suppressions": null
            },
            {
                "severity": "HIGH",
                "confidence": "LOW",
                "cwe": {"id": "798", "url": "https://cwe.mitre.org/data/definitions/798.html"},
                "rule_id": "G101",
                "details": "Potential hardcoded credentials",
                "file": "db.go",
                "code": "dsn := \"user:secret@/db\"",
                "line": "23",
                "column": "8",
                "nosec": false,
                "suppressions": null
            }
        ]
    }"#
    .to_string()
}

/// A Conveyor report with two sub-scanners (Moldy twice, CodeQuality once), a
/// nested file tree for the hash → filename indirection, and one result with
/// no sections.
pub fn sample_conveyor_report() -> String {
    r#"{
        "api_server_version": "4.5.0",
        "api_response": {
            "params": {"description": "Nightly submission"},
            "file_tree": {
                "sha-dropper": {
                    "name": ["dropper.exe"],
                    "children": {
                        "sha-payload": {"name": ["payload.dll"], "children": {}}
                    }
                }
            },
            "results": [
                {
                    "sha256": "sha-dropper",
                    "classification": "TLP:C",
                    "size": 4096,
                    "type": "executable/windows/pe64",
                    "response": {
                        "service_name": "Moldy",
                        "service_version": "1.2.3",
                        "milestones": {
                            "service_started": "2026-08-01T10:00:00+00:00",
                            "service_completed": "2026-08-01T10:00:05+00:00"
                        }
                    },
                    "result": {
                        "score": 750,
                        "sections": [
                            {
                                "title_text": "Suspicious import table",
                                "body": "imports VirtualAllocEx",
                                "body_format": "TEXT",
                                "classification": "TLP:C",
                                "depth": 1,
                                "heuristic": {"heur_id": "MOLDY.1", "score": 750, "name": "imports"}
                            }
                        ]
                    }
                },
                {
                    "sha256": "sha-payload",
                    "classification": "TLP:C",
                    "size": 1024,
                    "type": "executable/windows/dll64",
                    "response": {
                        "service_name": "Moldy",
                        "service_version": "1.2.3",
                        "milestones": {
                            "service_started": "2026-08-01T10:00:06+00:00",
                            "service_completed": "2026-08-01T10:00:07+00:00"
                        }
                    },
                    "result": {"score": 0, "sections": []}
                },
                {
                    "sha256": "sha-dropper",
                    "classification": "TLP:C",
                    "size": 4096,
                    "type": "executable/windows/pe64",
                    "response": {
                        "service_name": "CodeQuality",
                        "service_version": "0.9.0",
                        "milestones": {
                            "service_started": "2026-08-01T10:00:08+00:00",
                            "service_completed": "2026-08-01T10:00:09+00:00"
                        }
                    },
                    "result": {
                        "score": 0,
                        "sections": [
                            {
                                "title_text": "ok",
                                "body": "no issues found",
                                "body_format": "TEXT",
                                "classification": "TLP:C",
                                "depth": 0
                            }
                        ]
                    }
                }
            ]
        }
    }"#
    .to_string()
}
