//! Raw experimental measurements, compiled in
//!
//! Values transcribed from Aguilar-Luna et al. (2024): chlorophyll pigments
//! (mg·g⁻¹ fresh matter) and leaf nutrients (g·kg⁻¹ dry matter) per
//! treatment. The two tables cover different, partially overlapping subsets
//! of the factorial design.

/// (treatment code, chlorophyll a, chlorophyll b, chlorophyll total)
pub(super) const CHLOROPHYLL: [(&str, f64, f64, f64); 30] = [
    ("Co.T.278", 1.72, 0.83, 2.55),
    ("Co.T.440", 1.83, 0.97, 2.80),
    ("Co.M.278", 1.72, 0.83, 2.55),
    ("Co.M.440", 1.90, 0.95, 2.85),
    ("Co.A.168", 1.63, 0.83, 2.46),
    ("Co.A.278", 1.80, 0.98, 2.78),
    ("Co.A.440", 1.90, 0.95, 2.85),
    ("Co.P.278", 1.81, 0.91, 2.71),
    ("Co.P.440", 2.00, 1.08, 3.08),
    ("Ma.T.278", 1.71, 0.88, 2.59),
    ("Ma.T.440", 1.83, 0.90, 2.73),
    ("Ma.M.168", 1.60, 0.84, 2.44),
    ("Ma.M.440", 1.92, 0.91, 2.83),
    ("Ma.A.168", 1.68, 0.83, 2.51),
    ("Ma.A.440", 1.94, 0.85, 2.79),
    ("Ma.P.440", 2.05, 1.05, 3.08),
    ("Ca.T.278", 1.73, 0.84, 2.57),
    ("Ca.M.440", 1.92, 0.96, 2.88),
    ("Ca.A.278", 1.80, 0.83, 2.63),
    ("Ca.A.440", 1.92, 0.90, 2.82),
    ("Ca.P.278", 1.81, 0.89, 2.70),
    ("Ca.P.440", 2.01, 1.02, 3.03),
    ("Ga.T.278", 1.71, 0.84, 2.55),
    ("Ga.T.440", 1.83, 0.91, 2.74),
    ("Ga.M.278", 1.75, 0.89, 2.74),
    ("Ga.M.440", 1.92, 0.77, 2.69),
    ("Ga.A.278", 1.80, 0.88, 2.68),
    ("Ga.P.168", 1.71, 0.82, 2.53),
    ("Ga.P.278", 1.83, 0.91, 2.74),
    ("Ga.P.440", 2.02, 1.01, 3.03),
];

/// (treatment code, N, P, K, Ca, Mg)
pub(super) const NUTRIENTS: [(&str, f64, f64, f64, f64, f64); 22] = [
    ("Co.M.168", 25.13, 14.35, 16.53, 13.05, 4.03),
    ("Co.A.168", 25.87, 15.62, 18.31, 13.56, 4.30),
    ("Co.A.278", 25.58, 15.11, 17.77, 13.53, 4.13),
    ("Co.P.168", 26.53, 16.25, 19.33, 13.81, 4.45),
    ("Co.P.278", 26.22, 16.08, 18.64, 13.70, 4.29),
    ("Ma.M.168", 25.35, 14.51, 17.43, 13.55, 4.10),
    ("Ma.M.278", 25.07, 14.23, 16.40, 13.75, 3.94),
    ("Ma.A.168", 26.12, 15.91, 18.55, 13.53, 4.28),
    ("Ma.A.278", 25.77, 15.60, 17.92, 13.60, 4.19),
    ("Ma.P.168", 26.85, 16.74, 19.19, 13.96, 4.66),
    ("Ma.P.278", 26.41, 16.21, 19.11, 13.96, 4.40),
    ("Ca.M.168", 25.34, 14.55, 17.38, 13.69, 4.09),
    ("Ca.M.278", 24.90, 14.98, 18.44, 12.81, 3.90),
    ("Ca.A.168", 26.19, 15.80, 18.55, 13.75, 4.17),
    ("Ca.A.278", 25.77, 15.33, 17.90, 13.67, 4.17),
    ("Ca.P.168", 26.57, 16.62, 19.55, 13.94, 4.54),
    ("Ca.P.278", 26.44, 16.14, 19.09, 13.91, 4.37),
    ("Ga.M.168", 25.28, 14.33, 16.66, 13.20, 4.07),
    ("Ga.A.168", 25.55, 15.20, 17.79, 13.45, 4.30),
    ("Ga.A.278", 26.51, 16.55, 19.52, 13.83, 4.50),
    ("Ga.P.168", 26.51, 16.55, 18.74, 13.78, 4.31),
    ("Ga.P.278", 26.28, 16.48, 18.74, 13.78, 4.31),
];
