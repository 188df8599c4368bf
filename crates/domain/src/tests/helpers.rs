// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{MasterVillage, ModificationCase, TownCode, VillageCode, VillageRecord};
use time::{Date, Month};

pub fn test_date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

pub fn snapshot_date() -> Date {
    test_date(2024, Month::January, 1)
}

pub fn create_test_record(code: &str, town_code: &str, added_on: Option<Date>) -> VillageRecord {
    VillageRecord {
        code: VillageCode::new(code),
        name: format!("Village {code}"),
        name_en: format!("Village {code} EN"),
        town_code: TownCode::new(town_code),
        town_name: format!("Town {town_code}"),
        town_name_en: format!("Town {town_code} EN"),
        county_name: String::from("Test County"),
        county_name_en: String::from("Test County EN"),
        added_on,
        removed_on: None,
    }
}

pub fn create_test_case(case_id: &str, codes: &str, modified_on: Option<Date>) -> ModificationCase {
    ModificationCase::new(case_id, codes, modified_on)
}

pub fn create_master_village(town_code: &str, code: &str, name: &str) -> MasterVillage {
    MasterVillage {
        county_name: String::from("Test County"),
        town_name: format!("Town {town_code}"),
        town_code: TownCode::new(town_code),
        code: VillageCode::new(code),
        name: String::from(name),
    }
}
