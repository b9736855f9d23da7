use super::AdvisorRecord;

struct RegionSeed {
    region_id: u8,
    region_name: &'static str,
    advisor_name: &'static str,
    phone: &'static str,
    email: &'static str,
    counties: &'static [&'static str],
}

// Contacts are the regional office lines; override with GRANT_ADVISOR_TABLE when staff change.
const REGIONS: &[RegionSeed] = &[
    RegionSeed {
        region_id: 1,
        region_name: "Southeast",
        advisor_name: "Southeast Regional Advisor",
        phone: "610-239-2400",
        email: "RA-BRCSoutheast@pa.gov",
        counties: &[
            "Berks",
            "Bucks",
            "Chester",
            "Delaware",
            "Lancaster",
            "Lehigh",
            "Montgomery",
            "Northampton",
            "Philadelphia",
            "Schuylkill",
        ],
    },
    RegionSeed {
        region_id: 2,
        region_name: "Northeast",
        advisor_name: "Northeast Regional Advisor",
        phone: "570-963-4250",
        email: "RA-BRCNortheast@pa.gov",
        counties: &[
            "Bradford",
            "Carbon",
            "Columbia",
            "Lackawanna",
            "Luzerne",
            "Monroe",
            "Montour",
            "Northumberland",
            "Pike",
            "Sullivan",
            "Susquehanna",
            "Wayne",
            "Wyoming",
        ],
    },
    RegionSeed {
        region_id: 3,
        region_name: "South Central",
        advisor_name: "South Central Regional Advisor",
        phone: "717-783-2658",
        email: "RA-BRCSouthCentral@pa.gov",
        counties: &[
            "Adams",
            "Cumberland",
            "Dauphin",
            "Franklin",
            "Fulton",
            "Huntingdon",
            "Juniata",
            "Lebanon",
            "Mifflin",
            "Perry",
            "Snyder",
            "Union",
            "York",
        ],
    },
    RegionSeed {
        region_id: 4,
        region_name: "Southwest",
        advisor_name: "Southwest Regional Advisor",
        phone: "412-770-2440",
        email: "RA-BRCSouthwest@pa.gov",
        counties: &[
            "Allegheny",
            "Armstrong",
            "Beaver",
            "Bedford",
            "Blair",
            "Cambria",
            "Fayette",
            "Greene",
            "Indiana",
            "Somerset",
            "Washington",
            "Westmoreland",
        ],
    },
    RegionSeed {
        region_id: 5,
        region_name: "Northwest",
        advisor_name: "Northwest Regional Advisor",
        phone: "814-337-0123",
        email: "RA-BRCNorthwest@pa.gov",
        counties: &[
            "Butler",
            "Clarion",
            "Crawford",
            "Erie",
            "Forest",
            "Jefferson",
            "Lawrence",
            "Mercer",
            "Venango",
            "Warren",
        ],
    },
    RegionSeed {
        region_id: 6,
        region_name: "North Central",
        advisor_name: "North Central Regional Advisor",
        phone: "570-327-3570",
        email: "RA-BRCNorthCentral@pa.gov",
        counties: &[
            "Cameron",
            "Centre",
            "Clearfield",
            "Clinton",
            "Elk",
            "Lycoming",
            "McKean",
            "Potter",
            "Tioga",
        ],
    },
];

pub fn embedded_regions() -> Vec<AdvisorRecord> {
    REGIONS
        .iter()
        .map(|seed| AdvisorRecord {
            region_id: seed.region_id,
            region_name: seed.region_name.to_string(),
            advisor_name: seed.advisor_name.to_string(),
            phone: seed.phone.to_string(),
            email: seed.email.to_string(),
            counties: seed
                .counties
                .iter()
                .map(|county| county.to_lowercase())
                .collect(),
        })
        .collect()
}
