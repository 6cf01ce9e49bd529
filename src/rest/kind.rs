//! The resource registry.
//!
//! Every object type the client can reach is a [`ResourceKind`]. The kind
//! resolves to a [`KindSpec`]: its URL path segment under `JSSResource`, the
//! root element of its XML documents, where identity and name live inside
//! that document, and the fields it declares.
//!
//! # Example
//!
//! ```rust
//! use jss_api::rest::ResourceKind;
//!
//! let spec = ResourceKind::Policy.spec();
//! assert_eq!(spec.path_segment, "policies");
//! assert_eq!(spec.root_tag, "policy");
//! assert_eq!(spec.id_path, "general/id");
//!
//! let kind: ResourceKind = "computergroups".parse().unwrap();
//! assert_eq!(kind, ResourceKind::ComputerGroup);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A named field declared by a resource kind.
///
/// `path` is slash-separated and relative to the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The field name used with `field` / `set_field`.
    pub name: &'static str,
    /// Element path holding the field's text.
    pub path: &'static str,
}

const fn field(name: &'static str, path: &'static str) -> FieldSpec {
    FieldSpec { name, path }
}

/// Static description of one resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSpec {
    /// URL segment under the API root, without slashes (e.g. `policies`).
    pub path_segment: &'static str,
    /// Root element of a single object's document (e.g. `policy`).
    pub root_tag: &'static str,
    /// Element path holding the object id.
    pub id_path: &'static str,
    /// Element path holding the object name.
    pub name_path: &'static str,
    /// Declared fields.
    pub fields: &'static [FieldSpec],
}

impl KindSpec {
    /// Looks up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Resource kinds exposed by the JSS Classic API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `/advancedcomputersearches`
    AdvancedComputerSearch,
    /// `/buildings`
    Building,
    /// `/categories`
    Category,
    /// `/computers`
    Computer,
    /// `/computerextensionattributes`
    ComputerExtensionAttribute,
    /// `/computergroups`
    ComputerGroup,
    /// `/departments`
    Department,
    /// `/distributionpoints`
    DistributionPoint,
    /// `/ldapservers`
    LdapServer,
    /// `/mobiledevices`
    MobileDevice,
    /// `/mobiledeviceapplications`
    MobileDeviceApplication,
    /// `/mobiledeviceconfigurationprofiles`
    MobileDeviceConfigurationProfile,
    /// `/mobiledevicegroups`
    MobileDeviceGroup,
    /// `/networksegments`
    NetworkSegment,
    /// `/osxconfigurationprofiles`
    OsxConfigurationProfile,
    /// `/packages`
    Package,
    /// `/policies`
    Policy,
    /// `/printers`
    Printer,
    /// `/scripts`
    Script,
    /// `/sites`
    Site,
}

const NAME_ONLY: &[FieldSpec] = &[field("name", "name")];

const SMART_GROUP: &[FieldSpec] = &[
    field("name", "name"),
    field("is_smart", "is_smart"),
    field("site", "site/name"),
];

const ADVANCED_COMPUTER_SEARCH: KindSpec = KindSpec {
    path_segment: "advancedcomputersearches",
    root_tag: "advanced_computer_search",
    id_path: "id",
    name_path: "name",
    fields: &[
        field("name", "name"),
        field("view_as", "view_as"),
        field("sort_1", "sort_1"),
        field("site", "site/name"),
    ],
};

const BUILDING: KindSpec = KindSpec {
    path_segment: "buildings",
    root_tag: "building",
    id_path: "id",
    name_path: "name",
    fields: NAME_ONLY,
};

const CATEGORY: KindSpec = KindSpec {
    path_segment: "categories",
    root_tag: "category",
    id_path: "id",
    name_path: "name",
    fields: &[field("name", "name"), field("priority", "priority")],
};

const COMPUTER: KindSpec = KindSpec {
    path_segment: "computers",
    root_tag: "computer",
    id_path: "general/id",
    name_path: "general/name",
    fields: &[
        field("name", "general/name"),
        field("serial_number", "general/serial_number"),
        field("udid", "general/udid"),
        field("mac_address", "general/mac_address"),
        field("ip_address", "general/ip_address"),
        field("platform", "general/platform"),
        field("username", "location/username"),
        field("building", "location/building"),
        field("department", "location/department"),
    ],
};

const COMPUTER_EXTENSION_ATTRIBUTE: KindSpec = KindSpec {
    path_segment: "computerextensionattributes",
    root_tag: "computer_extension_attribute",
    id_path: "id",
    name_path: "name",
    fields: &[
        field("name", "name"),
        field("description", "description"),
        field("data_type", "data_type"),
        field("input_type", "input_type/type"),
        field("inventory_display", "inventory_display"),
    ],
};

const COMPUTER_GROUP: KindSpec = KindSpec {
    path_segment: "computergroups",
    root_tag: "computer_group",
    id_path: "id",
    name_path: "name",
    fields: SMART_GROUP,
};

const DEPARTMENT: KindSpec = KindSpec {
    path_segment: "departments",
    root_tag: "department",
    id_path: "id",
    name_path: "name",
    fields: NAME_ONLY,
};

const DISTRIBUTION_POINT: KindSpec = KindSpec {
    path_segment: "distributionpoints",
    root_tag: "distribution_point",
    id_path: "id",
    name_path: "name",
    fields: &[
        field("name", "name"),
        field("ip_address", "ip_address"),
        field("is_master", "is_master"),
        field("connection_type", "connection_type"),
        field("share_name", "share_name"),
    ],
};

const LDAP_SERVER: KindSpec = KindSpec {
    path_segment: "ldapservers",
    root_tag: "ldap_server",
    id_path: "connection/id",
    name_path: "connection/name",
    fields: &[
        field("name", "connection/name"),
        field("hostname", "connection/hostname"),
        field("port", "connection/port"),
        field("server_type", "connection/server_type"),
        field("use_ssl", "connection/use_ssl"),
        field("authentication_type", "connection/authentication_type"),
    ],
};

const MOBILE_DEVICE: KindSpec = KindSpec {
    path_segment: "mobiledevices",
    root_tag: "mobile_device",
    id_path: "general/id",
    name_path: "general/name",
    fields: &[
        field("name", "general/name"),
        field("serial_number", "general/serial_number"),
        field("udid", "general/udid"),
        field("model", "general/model"),
        field("os_version", "general/os_version"),
        field("phone_number", "general/phone_number"),
        field("username", "location/username"),
    ],
};

const MOBILE_DEVICE_APPLICATION: KindSpec = KindSpec {
    path_segment: "mobiledeviceapplications",
    root_tag: "mobile_device_application",
    id_path: "general/id",
    name_path: "general/name",
    fields: &[
        field("name", "general/name"),
        field("display_name", "general/display_name"),
        field("bundle_id", "general/bundle_id"),
        field("version", "general/version"),
        field("category", "general/category/name"),
    ],
};

const MOBILE_DEVICE_CONFIGURATION_PROFILE: KindSpec = KindSpec {
    path_segment: "mobiledeviceconfigurationprofiles",
    root_tag: "configuration_profile",
    id_path: "general/id",
    name_path: "general/name",
    fields: &[
        field("name", "general/name"),
        field("description", "general/description"),
        field("level", "general/level"),
        field("category", "general/category/name"),
        field("payloads", "general/payloads"),
    ],
};

const MOBILE_DEVICE_GROUP: KindSpec = KindSpec {
    path_segment: "mobiledevicegroups",
    root_tag: "mobile_device_group",
    id_path: "id",
    name_path: "name",
    fields: SMART_GROUP,
};

const NETWORK_SEGMENT: KindSpec = KindSpec {
    path_segment: "networksegments",
    root_tag: "network_segment",
    id_path: "id",
    name_path: "name",
    fields: &[
        field("name", "name"),
        field("starting_address", "starting_address"),
        field("ending_address", "ending_address"),
        field("building", "building"),
        field("department", "department"),
        field("distribution_point", "distribution_point"),
    ],
};

const OSX_CONFIGURATION_PROFILE: KindSpec = KindSpec {
    path_segment: "osxconfigurationprofiles",
    root_tag: "os_x_configuration_profile",
    id_path: "general/id",
    name_path: "general/name",
    fields: &[
        field("name", "general/name"),
        field("description", "general/description"),
        field("level", "general/level"),
        field("distribution_method", "general/distribution_method"),
        field("category", "general/category/name"),
        field("payloads", "general/payloads"),
    ],
};

const PACKAGE: KindSpec = KindSpec {
    path_segment: "packages",
    root_tag: "package",
    id_path: "id",
    name_path: "name",
    fields: &[
        field("name", "name"),
        field("category", "category"),
        field("filename", "filename"),
        field("info", "info"),
        field("notes", "notes"),
        field("priority", "priority"),
        field("reboot_required", "reboot_required"),
        field("os_requirements", "os_requirements"),
    ],
};

const POLICY: KindSpec = KindSpec {
    path_segment: "policies",
    root_tag: "policy",
    id_path: "general/id",
    name_path: "general/name",
    fields: &[
        field("name", "general/name"),
        field("enabled", "general/enabled"),
        field("trigger", "general/trigger"),
        field("frequency", "general/frequency"),
        field("category", "general/category/name"),
        field("site", "general/site/name"),
    ],
};

const PRINTER: KindSpec = KindSpec {
    path_segment: "printers",
    root_tag: "printer",
    id_path: "id",
    name_path: "name",
    fields: &[
        field("name", "name"),
        field("category", "category"),
        field("uri", "uri"),
        field("cups_name", "CUPS_name"),
        field("location", "location"),
        field("model", "model"),
        field("make_default", "make_default"),
        field("shared", "shared"),
    ],
};

const SCRIPT: KindSpec = KindSpec {
    path_segment: "scripts",
    root_tag: "script",
    id_path: "id",
    name_path: "name",
    fields: &[
        field("name", "name"),
        field("category", "category"),
        field("filename", "filename"),
        field("info", "info"),
        field("notes", "notes"),
        field("priority", "priority"),
        field("script_contents", "script_contents"),
        field("os_requirements", "os_requirements"),
    ],
};

const SITE: KindSpec = KindSpec {
    path_segment: "sites",
    root_tag: "site",
    id_path: "id",
    name_path: "name",
    fields: NAME_ONLY,
};

impl ResourceKind {
    /// Every registered kind.
    pub const ALL: [Self; 20] = [
        Self::AdvancedComputerSearch,
        Self::Building,
        Self::Category,
        Self::Computer,
        Self::ComputerExtensionAttribute,
        Self::ComputerGroup,
        Self::Department,
        Self::DistributionPoint,
        Self::LdapServer,
        Self::MobileDevice,
        Self::MobileDeviceApplication,
        Self::MobileDeviceConfigurationProfile,
        Self::MobileDeviceGroup,
        Self::NetworkSegment,
        Self::OsxConfigurationProfile,
        Self::Package,
        Self::Policy,
        Self::Printer,
        Self::Script,
        Self::Site,
    ];

    /// Returns the registry entry for this kind.
    #[must_use]
    pub const fn spec(self) -> &'static KindSpec {
        match self {
            Self::AdvancedComputerSearch => &ADVANCED_COMPUTER_SEARCH,
            Self::Building => &BUILDING,
            Self::Category => &CATEGORY,
            Self::Computer => &COMPUTER,
            Self::ComputerExtensionAttribute => &COMPUTER_EXTENSION_ATTRIBUTE,
            Self::ComputerGroup => &COMPUTER_GROUP,
            Self::Department => &DEPARTMENT,
            Self::DistributionPoint => &DISTRIBUTION_POINT,
            Self::LdapServer => &LDAP_SERVER,
            Self::MobileDevice => &MOBILE_DEVICE,
            Self::MobileDeviceApplication => &MOBILE_DEVICE_APPLICATION,
            Self::MobileDeviceConfigurationProfile => &MOBILE_DEVICE_CONFIGURATION_PROFILE,
            Self::MobileDeviceGroup => &MOBILE_DEVICE_GROUP,
            Self::NetworkSegment => &NETWORK_SEGMENT,
            Self::OsxConfigurationProfile => &OSX_CONFIGURATION_PROFILE,
            Self::Package => &PACKAGE,
            Self::Policy => &POLICY,
            Self::Printer => &PRINTER,
            Self::Script => &SCRIPT,
            Self::Site => &SITE,
        }
    }

    /// Returns the Rust-facing name of the kind (e.g. `ComputerGroup`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AdvancedComputerSearch => "AdvancedComputerSearch",
            Self::Building => "Building",
            Self::Category => "Category",
            Self::Computer => "Computer",
            Self::ComputerExtensionAttribute => "ComputerExtensionAttribute",
            Self::ComputerGroup => "ComputerGroup",
            Self::Department => "Department",
            Self::DistributionPoint => "DistributionPoint",
            Self::LdapServer => "LdapServer",
            Self::MobileDevice => "MobileDevice",
            Self::MobileDeviceApplication => "MobileDeviceApplication",
            Self::MobileDeviceConfigurationProfile => "MobileDeviceConfigurationProfile",
            Self::MobileDeviceGroup => "MobileDeviceGroup",
            Self::NetworkSegment => "NetworkSegment",
            Self::OsxConfigurationProfile => "OsxConfigurationProfile",
            Self::Package => "Package",
            Self::Policy => "Policy",
            Self::Printer => "Printer",
            Self::Script => "Script",
            Self::Site => "Site",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no registered kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown resource kind '{input}'")]
pub struct UnknownKind {
    /// The unrecognised input.
    pub input: String,
}

impl FromStr for ResourceKind {
    type Err = UnknownKind;

    /// Parses a kind from its Rust name, path segment or root tag,
    /// ignoring ASCII case and a leading `/`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().trim_start_matches('/');
        Self::ALL
            .into_iter()
            .find(|kind| {
                let spec = kind.spec();
                [kind.name(), spec.path_segment, spec.root_tag]
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(needle))
            })
            .ok_or_else(|| UnknownKind {
                input: s.to_string(),
            })
    }
}
