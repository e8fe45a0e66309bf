//! Static helpline directory (India).

use serde::Serialize;

/// India's universal emergency number.
pub const EMERGENCY_NUMBER: &str = "112";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Helpline {
    pub id: &'static str,
    pub name: &'static str,
    pub contact: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HelplineDirectory {
    pub emergency_number: &'static str,
    pub government: &'static [Helpline],
    pub ngo_and_private: &'static [Helpline],
}

const fn line(
    id: &'static str,
    name: &'static str,
    contact: &'static str,
    description: &'static str,
    availability: &'static str,
) -> Helpline {
    Helpline {
        id,
        name,
        contact,
        description,
        availability: Some(availability),
        notes: None,
    }
}

pub const GOVERNMENT: &[Helpline] = &[
    Helpline {
        notes: Some("Available in 13 languages."),
        ..line(
            "kiran-helpline",
            "KIRAN (Ministry of Social Justice & Empowerment)",
            "1800-599-0019",
            "A 24x7 toll-free mental health rehabilitation helpline offering support in 13 languages. Provides early screening, first-aid, psychological support, distress management, and referrals.",
            "24×7 (Toll-Free)",
        )
    },
    line(
        "nimhans-psychosocial-support",
        "NIMHANS Psychosocial Support (Ministry of Health & Family Welfare)",
        "080-46110007",
        "A national psychosocial support helpline by NIMHANS, Bengaluru, offering counselling and support for mental health concerns.",
        "24×7 (Toll-Free)",
    ),
];

pub const NGO_AND_PRIVATE: &[Helpline] = &[
    line(
        "vandrevala-foundation",
        "Vandrevala Foundation",
        "+91-9999-666-555 (Call or WhatsApp)",
        "Provides free psychological counselling and crisis mediation by professionally trained counsellors.",
        "24×7×365",
    ),
    line(
        "aasra",
        "AASRA (Mumbai-based Suicide Prevention & Counselling)",
        "022-2754-6669 / +91-9820466726",
        "Offers confidential support for individuals in distress and those experiencing suicidal thoughts.",
        "24×7 (Confidential)",
    ),
    line(
        "icall-tiss",
        "iCall (TISS School of Human Ecology)",
        "91529-87821",
        "Provides professional and confidential counselling, information, and referral services via telephone and email.",
        "Mon–Sat, 10 am–8 pm",
    ),
    line(
        "1life",
        "1Life",
        "07893-078930",
        "A suicide prevention helpline offering emotional support to those who are in distress or despair.",
        "24×7",
    ),
    line(
        "lifeline-foundation-kolkata",
        "Lifeline Foundation (Kolkata)",
        "+91-9088030303 / 033-40447437",
        "Offers emotional support to people who are in distress, despair or suicidal.",
        "10 am–10 pm Daily",
    ),
    line(
        "samaritans-mumbai",
        "Samaritans Mumbai",
        "+91-84229-84530 / +91-84229-84528 / +91-84229-84529",
        "Provides confidential emotional support to anyone in distress or despair, including those who are suicidal.",
        "Daily, 3 pm–9 pm",
    ),
    line(
        "sneha-chennai",
        "Sneha (Chennai)",
        "044-24640050 / 044-24640060",
        "Offers unconditional emotional support to people in distress, despair, or suicidal.",
        "24×7",
    ),
    line(
        "muktaa-lgbtq-helpline",
        "Muktaa Charitable Foundation (Maharashtra LGBTQ Helpline)",
        "07887-889882",
        "A dedicated helpline providing support for LGBTQ individuals in Maharashtra.",
        "Mon–Sat, 12 pm–8 pm",
    ),
    line(
        "jeevan-aastha-helpline",
        "Jeevan Aastha Helpline (Gandhinagar Police Initiative)",
        "1800-233-3330",
        "A 24x7 suicide prevention helpline initiated by Gandhinagar Police.",
        "24×7",
    ),
    line(
        "parivarthan-counselling",
        "Parivarthan Counselling",
        "+91-7676-602-602",
        "Offers counselling, training, and awareness programs related to mental health.",
        "Timings vary",
    ),
    line(
        "roshni-trust-hyderabad",
        "Roshni Trust (Hyderabad)",
        "040-66202000 / 040-66202001 / +91-8142020033",
        "Provides free and confidential emotional support to people who are in distress or despair.",
        "Daily, 11 am to 9 pm",
    ),
    line(
        "ngo-space-lgbtq-helpline",
        "NGO Space LGBTQ Helpline",
        "1800-111-015",
        "A 24x7 helpline dedicated to supporting the LGBTQ community across India.",
        "24×7",
    ),
];

pub fn directory() -> HelplineDirectory {
    HelplineDirectory {
        emergency_number: EMERGENCY_NUMBER,
        government: GOVERNMENT,
        ngo_and_private: NGO_AND_PRIVATE,
    }
}

/// Look up a helpline by id across both sections.
pub fn find(id: &str) -> Option<&'static Helpline> {
    GOVERNMENT.iter().chain(NGO_AND_PRIVATE).find(|h| h.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<_> = GOVERNMENT.iter().chain(NGO_AND_PRIVATE).map(|h| h.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn kiran_carries_language_note() {
        let kiran = find("kiran-helpline").unwrap();
        assert_eq!(kiran.contact, "1800-599-0019");
        assert_eq!(kiran.notes, Some("Available in 13 languages."));
        assert!(find("nope").is_none());
    }
}
