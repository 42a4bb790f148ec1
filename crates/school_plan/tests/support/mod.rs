#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// A small TypeScript dataset in the shape of the production export:
/// unquoted keys, mixed string/number values, Arabic labels, a record at
/// (0, 0), a record with no coordinates and a repeated identifier.
pub const SCHOOLS_TS: &str = r#"// Schools of the Madinah region
export const schoolsData: School[] = [
  {
    SchoolID: "1001",
    SchoolName: "ابتدائية الأولى",
    Level: "المرحلة الإبتدائية",
    SchoolGender: "بنين",
    Latitude: "24.4672",
    Longitude: "39.6024",
    SectorDescription: "Central",
    PrincipalName: "Salem",
    PrincipalPhone: "0500000001",
    SchoolEmail: "1001@schools.example",
  },
  {
    SchoolID: 1002,
    SchoolName: "ابتدائية الثانية",
    Level: "المرحلة الإبتدائية",
    SchoolGender: "بنين",
    Latitude: 24.5247,
    Longitude: 39.5692,
    SectorDescription: "North",
    PrincipalName: "Khalid",
    PrincipalPhone: "0500000002",
  },
  {
    SchoolID: "2001",
    SchoolName: "ابتدائية البنات",
    Level: "المرحلة الإبتدائية",
    SchoolGender: "بنات",
    Latitude: "24.468",
    Longitude: "39.603",
    SectorDescription: "Central",
  },
  {
    SchoolID: "3001",
    SchoolName: "ثانوية الأولى",
    Level: "المرحلة الثانوية",
    SchoolGender: "بنين",
    Latitude: "24.469",
    Longitude: "39.604",
    SectorDescription: "Central",
  },
  {
    SchoolID: "9999",
    SchoolName: "بلا موقع",
    Level: "المرحلة الإبتدائية",
    SchoolGender: "بنين",
    Latitude: "0",
    Longitude: "0",
  },
  {
    SchoolID: "9998",
    SchoolName: "بلا إحداثيات",
    Level: "المرحلة الإبتدائية",
    SchoolGender: "بنين",
    Latitude: "",
  },
  {
    SchoolID: "1001",
    SchoolName: "مكررة",
    Level: "المرحلة الإبتدائية",
    SchoolGender: "بنين",
    Latitude: "24.60",
    Longitude: "39.70",
  },
];
"#;

pub fn write_dataset(dir: &Path) -> PathBuf {
    let path = dir.join("schools.ts");
    std::fs::write(&path, SCHOOLS_TS).expect("write dataset");
    path
}
