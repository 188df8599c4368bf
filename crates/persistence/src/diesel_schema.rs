// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

// Tables of the administrative boundary database export. Column names keep
// the casing of the source database.

diesel::table! {
    #[sql_name = "Village_NLSC"]
    village_nlsc (rowid) {
        rowid -> BigInt,
        #[sql_name = "C_Name"]
        county_name -> Nullable<Text>,
        #[sql_name = "C_Name_e"]
        county_name_en -> Nullable<Text>,
        #[sql_name = "T_Name"]
        town_name -> Nullable<Text>,
        #[sql_name = "T_Name_e"]
        town_name_en -> Nullable<Text>,
        #[sql_name = "TOWN_ID"]
        town_id -> Nullable<Text>,
        #[sql_name = "V_Name"]
        village_name -> Nullable<Text>,
        #[sql_name = "V_Name_e"]
        village_name_en -> Nullable<Text>,
        #[sql_name = "VILLAGE_ID"]
        village_id -> Nullable<Text>,
        #[sql_name = "Add_Date"]
        add_date -> Nullable<Text>,
        #[sql_name = "Del_Date"]
        del_date -> Nullable<Text>,
    }
}

diesel::table! {
    #[sql_name = "Modify_Data"]
    modify_data (rowid) {
        rowid -> BigInt,
        #[sql_name = "CASE_ID"]
        case_id -> Nullable<Text>,
        #[sql_name = "Admin_ID"]
        admin_id -> Nullable<Text>,
        #[sql_name = "M_Date"]
        m_date -> Nullable<Text>,
    }
}
