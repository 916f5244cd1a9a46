//! Static glossary of common contract terms

use shared_types::GlossaryEntry;

pub const GLOSSARY: [GlossaryEntry; 11] = [
    GlossaryEntry {
        term: "Indemnity",
        definition: "Protection against loss or damage",
    },
    GlossaryEntry {
        term: "Arbitration",
        definition: "Legal dispute resolved outside court",
    },
    GlossaryEntry {
        term: "Liability",
        definition: "Legal responsibility for damages",
    },
    GlossaryEntry {
        term: "Confidentiality",
        definition: "Obligation to keep information secret",
    },
    GlossaryEntry {
        term: "Force Majeure",
        definition: "Unforeseeable circumstances that prevent contract fulfillment",
    },
    GlossaryEntry {
        term: "Breach",
        definition: "Failure to fulfill contractual obligations",
    },
    GlossaryEntry {
        term: "Warranty",
        definition: "A guarantee about the quality or performance of something",
    },
    GlossaryEntry {
        term: "Notice",
        definition: "Formal written notification",
    },
    GlossaryEntry {
        term: "Jurisdiction",
        definition: "The legal authority over a particular area or case",
    },
    GlossaryEntry {
        term: "Assignment",
        definition: "Transfer of rights or obligations",
    },
    GlossaryEntry {
        term: "Non-compete",
        definition: "Clause preventing competition for a period",
    },
];
