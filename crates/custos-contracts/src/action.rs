//! The closed action vocabulary.
//!
//! Every operation subject to authorization is named here. Each action
//! carries a human-readable description (used verbatim in deny reasons)
//! and a kind — read or write — consumed by the finalized-process
//! override: a finalized process admits read actions only.
//!
//! The rule table in `custos-engine` must cover this vocabulary; an action
//! with no rule and no special-case handler is a configuration defect
//! surfaced as `UnknownAction`.

use serde::{Deserialize, Serialize};

/// Whether an action observes or mutates its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Read,
    Write,
}

/// A named operation subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // Process administration
    ViewProcess,
    ListProcesses,
    CreateProcess,
    EditProcess,
    DeleteProcess,
    StartProcess,
    FinalizeProcess,
    ExportProcessReport,

    // Subprocess and activity registry lifecycle
    ViewSubprocess,
    CreateSubprocess,
    EditSubprocess,
    DeleteSubprocess,
    ReopenSubprocess,
    StartRegistry,
    EditRegistry,
    FinishRegistry,
    MakeRegistryAvailable,
    HomologateRegistry,
    ReturnRegistry,
    ViewRegistryHistory,

    // Competency map lifecycle
    ViewMap,
    CreateMap,
    EditMap,
    DeleteMap,
    MakeMapAvailable,
    ValidateMap,
    SuggestMapAdjustment,
    FinishMapAdjustment,
    HomologateMap,
    ReturnMap,
    ExportMap,

    // Activities and knowledge items
    ViewActivity,
    CreateActivity,
    EditActivity,
    DeleteActivity,
    ImportActivities,
    ExportActivities,
    AddKnowledge,
    EditKnowledge,
    RemoveKnowledge,

    // Organizational units
    ViewUnit,
    ViewUnitTree,
    EditUnitResponsible,

    // Custody routing
    TransferSubprocess,
    AcceptTransfer,
    ReturnTransfer,
    ViewTransferHistory,

    // Reporting and administration
    ViewDashboard,
    ViewReport,
    ViewAdminPanel,
    ViewAuditTrail,
    ManageAttributions,
    NotifyUnit,

    // Special-cased actions (owned end-to-end by dedicated handlers)
    VerifyImpact,
    ConsultForImport,
}

impl Action {
    /// Every action in the vocabulary, for table-coverage checks and tests.
    pub const ALL: [Action; 55] = [
        Action::ViewProcess,
        Action::ListProcesses,
        Action::CreateProcess,
        Action::EditProcess,
        Action::DeleteProcess,
        Action::StartProcess,
        Action::FinalizeProcess,
        Action::ExportProcessReport,
        Action::ViewSubprocess,
        Action::CreateSubprocess,
        Action::EditSubprocess,
        Action::DeleteSubprocess,
        Action::ReopenSubprocess,
        Action::StartRegistry,
        Action::EditRegistry,
        Action::FinishRegistry,
        Action::MakeRegistryAvailable,
        Action::HomologateRegistry,
        Action::ReturnRegistry,
        Action::ViewRegistryHistory,
        Action::ViewMap,
        Action::CreateMap,
        Action::EditMap,
        Action::DeleteMap,
        Action::MakeMapAvailable,
        Action::ValidateMap,
        Action::SuggestMapAdjustment,
        Action::FinishMapAdjustment,
        Action::HomologateMap,
        Action::ReturnMap,
        Action::ExportMap,
        Action::ViewActivity,
        Action::CreateActivity,
        Action::EditActivity,
        Action::DeleteActivity,
        Action::ImportActivities,
        Action::ExportActivities,
        Action::AddKnowledge,
        Action::EditKnowledge,
        Action::RemoveKnowledge,
        Action::ViewUnit,
        Action::ViewUnitTree,
        Action::EditUnitResponsible,
        Action::TransferSubprocess,
        Action::AcceptTransfer,
        Action::ReturnTransfer,
        Action::ViewTransferHistory,
        Action::ViewDashboard,
        Action::ViewReport,
        Action::ViewAdminPanel,
        Action::ViewAuditTrail,
        Action::ManageAttributions,
        Action::NotifyUnit,
        Action::VerifyImpact,
        Action::ConsultForImport,
    ];

    /// Read or write, as consumed by the finalized-process override.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::ViewProcess
            | Action::ListProcesses
            | Action::ExportProcessReport
            | Action::ViewSubprocess
            | Action::ViewRegistryHistory
            | Action::ViewMap
            | Action::ExportMap
            | Action::ViewActivity
            | Action::ExportActivities
            | Action::ViewUnit
            | Action::ViewUnitTree
            | Action::ViewTransferHistory
            | Action::ViewDashboard
            | Action::ViewReport
            | Action::ViewAdminPanel
            | Action::ViewAuditTrail
            | Action::VerifyImpact
            | Action::ConsultForImport => ActionKind::Read,
            _ => ActionKind::Write,
        }
    }

    /// Human-readable description, rendered verbatim in deny reasons.
    pub fn description(&self) -> &'static str {
        match self {
            Action::ViewProcess => "view process",
            Action::ListProcesses => "list processes",
            Action::CreateProcess => "create process",
            Action::EditProcess => "edit process",
            Action::DeleteProcess => "delete process",
            Action::StartProcess => "start process",
            Action::FinalizeProcess => "finalize process",
            Action::ExportProcessReport => "export process report",
            Action::ViewSubprocess => "view subprocess",
            Action::CreateSubprocess => "create subprocess",
            Action::EditSubprocess => "edit subprocess",
            Action::DeleteSubprocess => "delete subprocess",
            Action::ReopenSubprocess => "reopen subprocess",
            Action::StartRegistry => "start activity registry",
            Action::EditRegistry => "edit activity registry",
            Action::FinishRegistry => "finish activity registry",
            Action::MakeRegistryAvailable => "make registry available for review",
            Action::HomologateRegistry => "homologate registry",
            Action::ReturnRegistry => "return registry for adjustment",
            Action::ViewRegistryHistory => "view registry history",
            Action::ViewMap => "view competency map",
            Action::CreateMap => "create competency map",
            Action::EditMap => "edit competency map",
            Action::DeleteMap => "delete competency map",
            Action::MakeMapAvailable => "make map available for validation",
            Action::ValidateMap => "validate competency map",
            Action::SuggestMapAdjustment => "suggest map adjustment",
            Action::FinishMapAdjustment => "finish map adjustment",
            Action::HomologateMap => "homologate competency map",
            Action::ReturnMap => "return map for adjustment",
            Action::ExportMap => "export competency map",
            Action::ViewActivity => "view activity",
            Action::CreateActivity => "create activity",
            Action::EditActivity => "edit activity",
            Action::DeleteActivity => "delete activity",
            Action::ImportActivities => "import activities",
            Action::ExportActivities => "export activities",
            Action::AddKnowledge => "add knowledge item",
            Action::EditKnowledge => "edit knowledge item",
            Action::RemoveKnowledge => "remove knowledge item",
            Action::ViewUnit => "view unit",
            Action::ViewUnitTree => "view unit tree",
            Action::EditUnitResponsible => "edit unit responsible",
            Action::TransferSubprocess => "transfer subprocess custody",
            Action::AcceptTransfer => "accept subprocess transfer",
            Action::ReturnTransfer => "return subprocess transfer",
            Action::ViewTransferHistory => "view transfer history",
            Action::ViewDashboard => "view dashboard",
            Action::ViewReport => "view report",
            Action::ViewAdminPanel => "view administration panel",
            Action::ViewAuditTrail => "view audit trail",
            Action::ManageAttributions => "manage temporary attributions",
            Action::NotifyUnit => "notify unit",
            Action::VerifyImpact => "verify map impact",
            Action::ConsultForImport => "consult registry for import",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
