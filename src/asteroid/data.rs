//! Built-in sample catalog: the first numbered main-belt asteroids.
//!
//! Values follow the JPL small-body database export format (angles in
//! degrees, `a` and `q` in AU, period in years, diameter in km).

use super::CatalogEntry;

fn entry(
    pdes: &str,
    name: &str,
    full_name: &str,
    h: f64,
    diameter: f64,
    albedo: f64,
    e: f64,
    a: f64,
    q: f64,
    i: f64,
    om: f64,
    w: f64,
    ma: f64,
    per_y: f64,
) -> CatalogEntry {
    CatalogEntry {
        pdes: pdes.to_string(),
        name: Some(name.to_string()),
        full_name: Some(full_name.to_string()),
        h: Some(h),
        diameter: Some(diameter),
        albedo: Some(albedo),
        mass: None,
        a: Some(a),
        e,
        q: Some(q),
        i,
        om,
        w,
        ma,
        per_y: Some(per_y),
    }
}

/// The built-in catalog, in designation order.
#[rustfmt::skip]
pub fn builtin_catalog() -> Vec<CatalogEntry> {
    vec![
        entry("2", "Pallas", "2 Pallas (A802 FA)", 4.11, 513.0, 0.155, 0.2306, 2.77, 2.131, 34.93, 172.89, 310.93, 211.53, 4.61),
        entry("3", "Juno", "3 Juno (A804 RA)", 5.19, 246.596, 0.214, 0.2558, 2.671, 1.988, 12.99, 169.82, 247.88, 217.59, 4.37),
        entry("4", "Vesta", "4 Vesta (A807 FA)", 3.25, 522.77, 0.4228, 0.0902, 2.362, 2.149, 7.14, 103.7, 151.54, 26.81, 3.63),
        entry("5", "Astraea", "5 Astraea (A845 XA)", 6.99, 106.699, 0.274, 0.1875, 2.577, 2.094, 5.36, 141.45, 359.35, 133.87, 4.14),
        entry("6", "Hebe", "6 Hebe (A847 NA)", 5.61, 185.18, 0.2679, 0.2022, 2.425, 1.935, 14.74, 138.61, 239.7, 352.56, 3.78),
        entry("7", "Iris", "7 Iris (A847 PA)", 5.67, 199.83, 0.2766, 0.2302, 2.387, 1.837, 5.52, 259.49, 145.48, 61.73, 3.69),
        entry("8", "Flora", "8 Flora (A847 UA)", 6.61, 147.491, 0.226, 0.1563, 2.201, 1.857, 5.89, 110.84, 285.43, 198.9, 3.27),
        entry("9", "Metis", "9 Metis (A848 HA)", 6.34, 190.0, 0.118, 0.1226, 2.387, 2.094, 5.58, 68.87, 5.9, 199.2, 3.69),
        entry("10", "Hygiea", "10 Hygiea (A849 GA)", 5.65, 407.12, 0.0717, 0.1082, 3.148, 2.807, 3.83, 283.12, 312.61, 216.69, 5.58),
        entry("11", "Parthenope", "11 Parthenope (A850 JA)", 6.73, 142.887, 0.191, 0.1005, 2.453, 2.207, 4.64, 125.47, 196.42, 173.66, 3.84),
        entry("12", "Victoria", "12 Victoria (A850 RA)", 7.29, 115.087, 0.163, 0.2199, 2.334, 1.821, 8.37, 235.35, 69.55, 76.94, 3.57),
        entry("13", "Egeria", "13 Egeria (A850 VA)", 6.91, 202.636, 0.049, 0.0847, 2.576, 2.358, 16.53, 43.18, 79.06, 40.99, 4.14),
        entry("14", "Irene", "14 Irene (A851 KA)", 6.54, 152.0, 0.159, 0.1627, 2.588, 2.167, 9.13, 86.01, 98.27, 12.93, 4.16),
        entry("15", "Eunomia", "15 Eunomia (A851 OA)", 5.42, 231.689, 0.248, 0.1878, 2.642, 2.146, 11.76, 292.88, 98.51, 113.73, 4.29),
        entry("16", "Psyche", "16 Psyche (A852 FA)", 6.2, 222.0, 0.1203, 0.1343, 2.923, 2.531, 3.1, 150.01, 229.75, 40.64, 5.0),
    ]
}
