use soroban_sdk::contracterror;

/// Every rejection the vault can surface.
///
/// # Code ranges
/// | Range   | Purpose                          |
/// |---------|----------------------------------|
/// | 1 – 9   | Lifecycle / initialisation       |
/// | 10 – 19 | Authorisation                    |
/// | 20 – 39 | Ledger and transfer rejections   |
/// | 40+     | Configuration, math and upgrades |
///
/// Discriminants are part of the public ABI and must never be renumbered.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// Caller lacks the role required by a privileged entry point.
    Unauthorized = 10,

    // ── Ledger (20–39) ───────────────────────────────────────
    /// An amount-bearing operation was invoked with zero.
    ZeroAmount = 20,
    /// A required recipient is the null identity (the vault itself).
    ZeroAddress = 21,
    /// `extend_lock` was invoked with zero additional duration.
    ZeroDuration = 22,
    /// The program end date has passed, or too little of it remains.
    ProgramExpired = 23,
    /// The slot index is out of range or the slot was emptied.
    NonExistingDeposit = 24,
    /// Extend/increase attempted at or after the slot's `end`.
    DepositExpired = 25,
    /// Withdraw/kick attempted before the slot's `end`.
    TooSoon = 26,
    /// The token collaborator rejected a transfer.
    InsufficientAllowanceOrBalance = 27,
    /// A negative amount was supplied.
    InvalidAmount = 28,
    /// Shares can never be moved between accounts.
    NonTransferable = 29,
    /// Rewards cannot be spread over an empty share supply.
    NoShares = 30,

    // ── Configuration & math (40+) ───────────────────────────
    InvalidConfig = 40,
    InvalidCurve = 41,
    MultiplierTooHigh = 42,
    MathOverflow = 43,
    /// `migrate` would move the stored layout version backwards.
    LayoutDowngrade = 44,
    /// The escrow pool refused the forwarded reward deposit.
    EscrowForwardFailed = 45,
}
