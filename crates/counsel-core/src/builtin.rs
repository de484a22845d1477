//! The fixed example documents merged into every listing so a fresh
//! deployment is never empty. Read-only: deletion is refused and stored
//! documents shadow them on id collision.

use chrono::{DateTime, TimeZone, Utc};

use crate::types::{Document, DocumentSummary, NegotiationPoints, RiskLevel, RiskReport};

/// Ids reserved for the built-in example set.
pub const BUILTIN_IDS: &[&str] = &["1", "2", "3"];

pub fn is_builtin(id: &str) -> bool {
    BUILTIN_IDS.contains(&id)
}

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The example documents in their fixed order.
pub fn builtin_documents() -> Vec<Document> {
    vec![
        Document {
            id: "1".into(),
            title: "Commercial Lease Agreement".into(),
            created_at: date(2023, 10, 26),
            risk_level: RiskLevel::Medium,
            summary: DocumentSummary {
                facts: "This agreement is between \"Landlord Inc.\" and \"Tenant Corp.\" for the \
                        property at 123 Business Rd, commencing Nov 1, 2023 for 5 years."
                    .into(),
                obligations: "Tenant Corp. must pay $5000/month rent, maintain the property, and \
                              hold liability insurance. Landlord Inc. must maintain structural \
                              integrity and provide essential services."
                    .into(),
                rights: "Tenant Corp. has the right to quiet enjoyment and a first right of \
                         refusal on adjacent space. Landlord Inc. has the right to inspect the \
                         property with 24-hour notice."
                    .into(),
                deadlines: "Rent is due on the 1st of each month. A 90-day notice is required \
                            for lease renewal."
                    .into(),
            },
            risks: RiskReport {
                what_if_scenarios: vec![
                    "What if the tenant defaults on rent? Landlord can initiate eviction after \
                     a 10-day cure period."
                        .into(),
                    "What if the property is damaged by a natural disaster? Lease may be \
                     terminated if repairs exceed 60 days."
                        .into(),
                ],
            },
            related_laws: vec![
                "State Commercial Tenancy Act".into(),
                "Zoning Ordinance B-2".into(),
                "Fire Safety Code 101".into(),
            ],
            negotiation_points: NegotiationPoints {
                points: vec![
                    "Annual rent increase cap".into(),
                    "Subletting rights".into(),
                    "Termination clause penalties".into(),
                ],
                improvements: vec![
                    "Suggest adding a force majeure clause to cover unforeseen events.".into(),
                    "Clarify the terms for \"reasonable wear and tear\".".into(),
                ],
            },
            full_text: "This Commercial Lease Agreement (\"Lease\") is made and effective \
                        October 26, 2023, by and between Landlord Inc. (\"Landlord\") and Tenant \
                        Corp. (\"Tenant\"). Landlord is the owner of land and improvements \
                        commonly known and numbered as 123 Business Rd, Commerce City. Landlord \
                        makes available for lease a portion of the Building designated as Suite \
                        100 (\"Leased Premises\")..."
                .into(),
        },
        Document {
            id: "2".into(),
            title: "Software Development Contract".into(),
            created_at: date(2023, 11, 15),
            risk_level: RiskLevel::High,
            summary: DocumentSummary {
                facts: "Agreement between \"ClientCo\" and \"DevsRUs\" for the creation of a \
                        mobile application."
                    .into(),
                obligations: "DevsRUs must deliver the app by March 1, 2024. ClientCo must \
                              provide all necessary assets and pay in milestones."
                    .into(),
                rights: "ClientCo owns the final source code upon full payment. DevsRUs can \
                         showcase the project in their portfolio."
                    .into(),
                deadlines: "Alpha version due Jan 15, 2024. Final payment due March 15, 2024."
                    .into(),
            },
            risks: RiskReport {
                what_if_scenarios: vec![
                    "What if the project scope changes? A formal change order process must be \
                     initiated, potentially affecting cost and timeline."
                        .into(),
                    "What if a critical bug is found after launch? DevsRUs is obligated to \
                     provide support for 60 days post-launch."
                        .into(),
                ],
            },
            related_laws: vec![
                "Intellectual Property Act".into(),
                "Digital Millennium Copyright Act (DMCA)".into(),
            ],
            negotiation_points: NegotiationPoints {
                points: vec![
                    "Liability cap for damages".into(),
                    "Intellectual property ownership of pre-existing code".into(),
                    "Post-launch support period".into(),
                ],
                improvements: vec![
                    "Define \"project completion\" with specific, measurable acceptance \
                     criteria."
                        .into(),
                    "Include a clear dispute resolution clause (e.g., mediation).".into(),
                ],
            },
            full_text: "This Software Development Agreement (the \"Agreement\") is entered into \
                        as of November 15, 2023, by and between ClientCo, with offices at 456 \
                        Innovation Ave, and DevsRUs, a company based at 789 Code Lane. ClientCo \
                        engages DevsRUs to design, develop, and test a mobile application as \
                        specified in Exhibit A..."
                .into(),
        },
        Document {
            id: "3".into(),
            title: "Non-Disclosure Agreement (NDA)".into(),
            created_at: date(2023, 12, 1),
            risk_level: RiskLevel::Low,
            summary: DocumentSummary {
                facts: "A unilateral NDA where \"Disclosing Party\" shares confidential \
                        information with \"Receiving Party\"."
                    .into(),
                obligations: "Receiving Party must protect the information and not disclose it \
                              to third parties for a period of 3 years."
                    .into(),
                rights: "Disclosing Party retains all rights to its confidential information."
                    .into(),
                deadlines: "The agreement is effective immediately and obligations survive for \
                            3 years post-termination."
                    .into(),
            },
            risks: RiskReport {
                what_if_scenarios: vec![
                    "What if the Receiving Party accidentally discloses information? They must \
                     notify the Disclosing Party immediately and take steps to mitigate damage."
                        .into(),
                ],
            },
            related_laws: vec!["Uniform Trade Secrets Act".into()],
            negotiation_points: NegotiationPoints {
                points: vec![
                    "Definition of \"Confidential Information\"".into(),
                    "Duration of the confidentiality obligation".into(),
                    "Jurisdiction for legal disputes".into(),
                ],
                improvements: vec![
                    "Specifically list any exceptions to confidential information (e.g., \
                     publicly known information)."
                        .into(),
                    "Specify return or destruction of materials upon termination.".into(),
                ],
            },
            full_text: "This Non-Disclosure Agreement (the \"Agreement\") is made on December 1, \
                        2023, between Disclosing Party and Receiving Party. For the purpose of \
                        evaluating a potential business relationship, Disclosing Party may \
                        disclose certain confidential information to Receiving Party. Receiving \
                        Party agrees to hold such information in strict confidence..."
                .into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_match_documents() {
        let docs = builtin_documents();
        assert_eq!(docs.len(), BUILTIN_IDS.len());
        for (doc, id) in docs.iter().zip(BUILTIN_IDS) {
            assert_eq!(doc.id, *id);
            assert!(is_builtin(&doc.id));
        }
    }

    #[test]
    fn generated_ids_are_never_builtin() {
        assert!(!is_builtin(&crate::types::generate_document_id()));
    }
}
