//! Column names fixed by the upstream PatentsView download tables, plus the
//! columns the pipeline derives from them.

pub const PATENT_ID: &str = "patent_id";

// g_patent
pub const PATENT_TYPE: &str = "patent_type";
pub const PATENT_DATE: &str = "patent_date";
pub const PATENT_TITLE: &str = "patent_title";
pub const PATENT_ABSTRACT: &str = "patent_abstract";
pub const COMBINED_TEXT: &str = "combined_text";

// g_cpc_current
pub const CPC_SEQUENCE: &str = "cpc_sequence";
pub const CPC_SUBCLASS: &str = "cpc_subclass";
pub const CPC_CLASS: &str = "cpc_class";
pub const CPC_GROUP: &str = "cpc_group";

// g_assignee_disambiguated
pub const ASSIGNEE_SEQUENCE: &str = "assignee_sequence";
pub const ASSIGNEE_TYPE: &str = "assignee_type";
pub const ASSIGNEE_NAME_FIRST: &str = "disambig_assignee_individual_name_first";
pub const ASSIGNEE_NAME_LAST: &str = "disambig_assignee_individual_name_last";
pub const ASSIGNEE_ORGANIZATION: &str = "disambig_assignee_organization";
pub const LOCATION_ID: &str = "location_id";

/// Granular assignee category label.
pub const ASSIGNEE_TYPE_REG: &str = "assignee_type_reg";
pub const ASSIGNEE_TYPE_UNIFIED: &str = "assignee_type_unified";
pub const ASSIGNEE_NAME: &str = "assignee_name";

// g_location_disambiguated
pub const DISAMBIG_STATE: &str = "disambig_state";
pub const DISAMBIG_COUNTRY: &str = "disambig_country";
