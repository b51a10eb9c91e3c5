use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{CountryResolver, INVALID_COUNTRY, UNKNOWN_COUNTRY};

/// ITU E.164 country calling codes, one entry per assigned geographic code,
/// mapped to the main country of the numbering plan (shared codes such as
/// 1, 7, 44 and 61 resolve to the plan's main country). Non-geographic
/// service codes (800, 870, 88x, 979, ...) and the unused 379 assignment are
/// left out and fall through to `Unknown`.
const CALLING_CODES: &[(&str, &str)] = &[
    // Zone 1: North American Numbering Plan
    ("1", "United States"),
    // Zone 2: Africa and the Atlantic
    ("20", "Egypt"),
    ("211", "South Sudan"),
    ("212", "Morocco"),
    ("213", "Algeria"),
    ("216", "Tunisia"),
    ("218", "Libya"),
    ("220", "Gambia"),
    ("221", "Senegal"),
    ("222", "Mauritania"),
    ("223", "Mali"),
    ("224", "Guinea"),
    ("225", "Ivory Coast"),
    ("226", "Burkina Faso"),
    ("227", "Niger"),
    ("228", "Togo"),
    ("229", "Benin"),
    ("230", "Mauritius"),
    ("231", "Liberia"),
    ("232", "Sierra Leone"),
    ("233", "Ghana"),
    ("234", "Nigeria"),
    ("235", "Chad"),
    ("236", "Central African Republic"),
    ("237", "Cameroon"),
    ("238", "Cape Verde"),
    ("239", "Sao Tome and Principe"),
    ("240", "Equatorial Guinea"),
    ("241", "Gabon"),
    ("242", "Republic of the Congo"),
    ("243", "Democratic Republic of the Congo"),
    ("244", "Angola"),
    ("245", "Guinea-Bissau"),
    ("246", "British Indian Ocean Territory"),
    ("247", "Ascension Island"),
    ("248", "Seychelles"),
    ("249", "Sudan"),
    ("250", "Rwanda"),
    ("251", "Ethiopia"),
    ("252", "Somalia"),
    ("253", "Djibouti"),
    ("254", "Kenya"),
    ("255", "Tanzania"),
    ("256", "Uganda"),
    ("257", "Burundi"),
    ("258", "Mozambique"),
    ("260", "Zambia"),
    ("261", "Madagascar"),
    ("262", "Reunion"),
    ("263", "Zimbabwe"),
    ("264", "Namibia"),
    ("265", "Malawi"),
    ("266", "Lesotho"),
    ("267", "Botswana"),
    ("268", "Eswatini"),
    ("269", "Comoros"),
    ("27", "South Africa"),
    ("290", "Saint Helena"),
    ("291", "Eritrea"),
    ("297", "Aruba"),
    ("298", "Faroe Islands"),
    ("299", "Greenland"),
    // Zone 3: Europe
    ("30", "Greece"),
    ("31", "Netherlands"),
    ("32", "Belgium"),
    ("33", "France"),
    ("34", "Spain"),
    ("350", "Gibraltar"),
    ("351", "Portugal"),
    ("352", "Luxembourg"),
    ("353", "Ireland"),
    ("354", "Iceland"),
    ("355", "Albania"),
    ("356", "Malta"),
    ("357", "Cyprus"),
    ("358", "Finland"),
    ("359", "Bulgaria"),
    ("36", "Hungary"),
    ("370", "Lithuania"),
    ("371", "Latvia"),
    ("372", "Estonia"),
    ("373", "Moldova"),
    ("374", "Armenia"),
    ("375", "Belarus"),
    ("376", "Andorra"),
    ("377", "Monaco"),
    ("378", "San Marino"),
    ("380", "Ukraine"),
    ("381", "Serbia"),
    ("382", "Montenegro"),
    ("383", "Kosovo"),
    ("385", "Croatia"),
    ("386", "Slovenia"),
    ("387", "Bosnia and Herzegovina"),
    ("389", "North Macedonia"),
    ("39", "Italy"),
    // Zone 4: Europe
    ("40", "Romania"),
    ("41", "Switzerland"),
    ("420", "Czech Republic"),
    ("421", "Slovakia"),
    ("423", "Liechtenstein"),
    ("43", "Austria"),
    ("44", "United Kingdom"),
    ("45", "Denmark"),
    ("46", "Sweden"),
    ("47", "Norway"),
    ("48", "Poland"),
    ("49", "Germany"),
    // Zone 5: Central and South America
    ("500", "Falkland Islands"),
    ("501", "Belize"),
    ("502", "Guatemala"),
    ("503", "El Salvador"),
    ("504", "Honduras"),
    ("505", "Nicaragua"),
    ("506", "Costa Rica"),
    ("507", "Panama"),
    ("508", "Saint Pierre and Miquelon"),
    ("509", "Haiti"),
    ("51", "Peru"),
    ("52", "Mexico"),
    ("53", "Cuba"),
    ("54", "Argentina"),
    ("55", "Brazil"),
    ("56", "Chile"),
    ("57", "Colombia"),
    ("58", "Venezuela"),
    ("590", "Guadeloupe"),
    ("591", "Bolivia"),
    ("592", "Guyana"),
    ("593", "Ecuador"),
    ("594", "French Guiana"),
    ("595", "Paraguay"),
    ("596", "Martinique"),
    ("597", "Suriname"),
    ("598", "Uruguay"),
    ("599", "Curacao"),
    // Zone 6: Southeast Asia and Oceania
    ("60", "Malaysia"),
    ("61", "Australia"),
    ("62", "Indonesia"),
    ("63", "Philippines"),
    ("64", "New Zealand"),
    ("65", "Singapore"),
    ("66", "Thailand"),
    ("670", "East Timor"),
    ("672", "Norfolk Island"),
    ("673", "Brunei"),
    ("674", "Nauru"),
    ("675", "Papua New Guinea"),
    ("676", "Tonga"),
    ("677", "Solomon Islands"),
    ("678", "Vanuatu"),
    ("679", "Fiji"),
    ("680", "Palau"),
    ("681", "Wallis and Futuna"),
    ("682", "Cook Islands"),
    ("683", "Niue"),
    ("685", "Samoa"),
    ("686", "Kiribati"),
    ("687", "New Caledonia"),
    ("688", "Tuvalu"),
    ("689", "French Polynesia"),
    ("690", "Tokelau"),
    ("691", "Micronesia"),
    ("692", "Marshall Islands"),
    // Zone 7
    ("7", "Russia"),
    // Zone 8: East Asia
    ("81", "Japan"),
    ("82", "South Korea"),
    ("84", "Vietnam"),
    ("850", "North Korea"),
    ("852", "Hong Kong"),
    ("853", "Macau"),
    ("855", "Cambodia"),
    ("856", "Laos"),
    ("86", "China"),
    ("880", "Bangladesh"),
    ("886", "Taiwan"),
    // Zone 9: Middle East, South and Central Asia
    ("90", "Turkey"),
    ("91", "India"),
    ("92", "Pakistan"),
    ("93", "Afghanistan"),
    ("94", "Sri Lanka"),
    ("95", "Myanmar"),
    ("960", "Maldives"),
    ("961", "Lebanon"),
    ("962", "Jordan"),
    ("963", "Syria"),
    ("964", "Iraq"),
    ("965", "Kuwait"),
    ("966", "Saudi Arabia"),
    ("967", "Yemen"),
    ("968", "Oman"),
    ("970", "Palestine"),
    ("971", "United Arab Emirates"),
    ("972", "Israel"),
    ("973", "Bahrain"),
    ("974", "Qatar"),
    ("975", "Bhutan"),
    ("976", "Mongolia"),
    ("977", "Nepal"),
    ("98", "Iran"),
    ("992", "Tajikistan"),
    ("993", "Turkmenistan"),
    ("994", "Azerbaijan"),
    ("995", "Georgia"),
    ("996", "Kyrgyzstan"),
    ("998", "Uzbekistan"),
];

static CODE_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CALLING_CODES.iter().copied().collect());

// E.164: country code plus subscriber number. The shortest assigned full
// numbers are seven digits (small Pacific plans); fifteen is the hard cap.
const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

pub struct DialingPlanResolver;

impl CountryResolver for DialingPlanResolver {
    fn name(&self) -> &'static str {
        "dialing_plan"
    }

    /// Treats the identifier as an international number with an implicit
    /// leading `+`. Calling codes are one to three digits and prefix-free,
    /// so the longest match wins.
    fn resolve(&self, identifier: &str) -> &'static str {
        let trimmed = identifier.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || digits.starts_with('0')
            || !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len())
        {
            return INVALID_COUNTRY;
        }
        for len in (1..=3).rev() {
            if let Some(&country) = CODE_INDEX.get(&digits[..len]) {
                return country;
            }
        }
        UNKNOWN_COUNTRY
    }
}
