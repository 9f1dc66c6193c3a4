//! Catalogue of Indian states and union territories with their major cities.
//!
//! Signup and profile forms offer these as choices. Account city and state
//! remain free text; nothing validates against the catalogue.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// States and union territories paired with their cities, in display order.
pub const STATES_AND_CITIES: &[(&str, &[&str])] = &[
    (
        "Andhra Pradesh",
        &[
            "Visakhapatnam", "Vijayawada", "Guntur", "Nellore", "Kurnool", "Rajahmundry",
            "Tirupati", "Kakinada", "Kadapa", "Anantapur",
        ],
    ),
    ("Arunachal Pradesh", &["Itanagar", "Naharlagun", "Pasighat", "Tawang", "Ziro", "Bomdila"]),
    (
        "Assam",
        &[
            "Guwahati", "Silchar", "Dibrugarh", "Jorhat", "Nagaon", "Tinsukia", "Tezpur",
            "Bongaigaon",
        ],
    ),
    (
        "Bihar",
        &[
            "Patna", "Gaya", "Bhagalpur", "Muzaffarpur", "Purnia", "Darbhanga", "Bihar Sharif",
            "Arrah", "Begusarai", "Katihar",
        ],
    ),
    (
        "Chhattisgarh",
        &[
            "Raipur", "Bhilai", "Bilaspur", "Korba", "Rajnandgaon", "Raigarh", "Jagdalpur",
            "Ambikapur",
        ],
    ),
    ("Goa", &["Panaji", "Vasco da Gama", "Margao", "Mapusa", "Ponda", "Bicholim", "Curchorem"]),
    (
        "Gujarat",
        &[
            "Ahmedabad", "Surat", "Vadodara", "Rajkot", "Bhavnagar", "Jamnagar", "Junagadh",
            "Gandhinagar", "Gandhidham", "Anand",
        ],
    ),
    (
        "Haryana",
        &[
            "Faridabad", "Gurugram", "Panipat", "Ambala", "Yamunanagar", "Rohtak", "Hisar",
            "Karnal", "Sonipat", "Panchkula",
        ],
    ),
    (
        "Himachal Pradesh",
        &[
            "Shimla", "Dharamshala", "Solan", "Mandi", "Baddi", "Nahan", "Paonta Sahib",
            "Sundarnagar",
        ],
    ),
    (
        "Jharkhand",
        &[
            "Jamshedpur", "Dhanbad", "Ranchi", "Bokaro Steel City", "Deoghar", "Phusro",
            "Hazaribagh", "Giridih", "Ramgarh", "Medininagar",
        ],
    ),
    (
        "Karnataka",
        &[
            "Bengaluru", "Mysuru", "Hubballi-Dharwad", "Mangaluru", "Belagavi", "Kalaburagi",
            "Davanagere", "Ballari", "Vijayapura", "Shivamogga",
        ],
    ),
    (
        "Kerala",
        &[
            "Thiruvananthapuram", "Kochi", "Kozhikode", "Kollam", "Thrissur", "Kannur", "Alappuzha",
            "Palakkad", "Malappuram", "Kottayam",
        ],
    ),
    (
        "Madhya Pradesh",
        &[
            "Indore", "Bhopal", "Jabalpur", "Gwalior", "Ujjain", "Sagar", "Dewas", "Satna",
            "Ratlam", "Rewa",
        ],
    ),
    (
        "Maharashtra",
        &[
            "Mumbai", "Pune", "Nagpur", "Thane", "Nashik", "Kalyan-Dombivli", "Vasai-Virar",
            "Aurangabad", "Navi Mumbai", "Solapur",
        ],
    ),
    ("Manipur", &["Imphal", "Thoubal", "Kakching", "Ukhrul", "Churachandpur", "Bishnupur"]),
    ("Meghalaya", &["Shillong", "Tura", "Jowai", "Nongstoin", "Williamnagar", "Nongpoh"]),
    ("Mizoram", &["Aizawl", "Lunglei", "Saiha", "Champhai", "Kolasib", "Serchhip"]),
    ("Nagaland", &["Dimapur", "Kohima", "Mokokchung", "Tuensang", "Wokha", "Zunheboto"]),
    (
        "Odisha",
        &[
            "Bhubaneswar", "Cuttack", "Rourkela", "Berhampur", "Sambalpur", "Puri", "Balasore",
            "Bhadrak", "Baripada", "Jharsuguda",
        ],
    ),
    (
        "Punjab",
        &[
            "Ludhiana", "Amritsar", "Jalandhar", "Patiala", "Bathinda", "Mohali", "Hoshiarpur",
            "Batala", "Pathankot", "Moga",
        ],
    ),
    (
        "Rajasthan",
        &[
            "Jaipur", "Jodhpur", "Kota", "Bikaner", "Ajmer", "Udaipur", "Bhilwara", "Alwar",
            "Bharatpur", "Sikar",
        ],
    ),
    ("Sikkim", &["Gangtok", "Namchi", "Gyalshing", "Mangan", "Singtam", "Rangpo"]),
    (
        "Tamil Nadu",
        &[
            "Chennai", "Coimbatore", "Madurai", "Tiruchirappalli", "Salem", "Tirunelveli",
            "Tiruppur", "Vellore", "Erode", "Thoothukudi",
        ],
    ),
    (
        "Telangana",
        &[
            "Hyderabad", "Warangal", "Nizamabad", "Khammam", "Karimnagar", "Ramagundam",
            "Mahbubnagar", "Nalgonda", "Adilabad", "Suryapet",
        ],
    ),
    (
        "Tripura",
        &[
            "Agartala", "Dharmanagar", "Udaipur", "Kailasahar", "Bishalgarh", "Teliamura", "Khowai",
            "Belonia",
        ],
    ),
    (
        "Uttar Pradesh",
        &[
            "Lucknow", "Kanpur", "Ghaziabad", "Agra", "Meerut", "Varanasi", "Prayagraj", "Bareilly",
            "Aligarh", "Moradabad", "Noida",
        ],
    ),
    (
        "Uttarakhand",
        &[
            "Dehradun", "Haridwar", "Roorkee", "Haldwani", "Rudrapur", "Kashipur", "Rishikesh",
        ],
    ),
    (
        "West Bengal",
        &[
            "Kolkata", "Asansol", "Siliguri", "Durgapur", "Bardhaman", "Malda", "Baharampur",
            "Habra", "Kharagpur", "Shantipur",
        ],
    ),
    ("Andaman and Nicobar Islands", &["Port Blair"]),
    ("Chandigarh", &["Chandigarh"]),
    ("Dadra and Nagar Haveli and Daman and Diu", &["Daman", "Diu", "Silvassa"]),
    ("Delhi", &["New Delhi", "North Delhi", "South Delhi", "East Delhi", "West Delhi"]),
    ("Jammu and Kashmir", &["Srinagar", "Jammu", "Anantnag", "Baramulla", "Kathua", "Udhampur"]),
    ("Ladakh", &["Leh", "Kargil"]),
    ("Lakshadweep", &["Kavaratti"]),
    ("Puducherry", &["Puducherry", "Karaikal", "Mahe", "Yanam"]),
];

/// One state with its cities, as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StateCities {
    /// State or union territory name.
    pub state: String,
    /// Cities within it.
    pub cities: Vec<String>,
}

/// The full catalogue in display order.
pub fn catalogue() -> Vec<StateCities> {
    STATES_AND_CITIES
        .iter()
        .map(|(state, cities)| StateCities {
            state: (*state).to_owned(),
            cities: cities.iter().map(|c| (*c).to_owned()).collect(),
        })
        .collect()
}

/// Cities of `state`, matched case-insensitively.
pub fn cities_in(state: &str) -> Option<&'static [&'static str]> {
    STATES_AND_CITIES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(state))
        .map(|(_, cities)| *cities)
}
