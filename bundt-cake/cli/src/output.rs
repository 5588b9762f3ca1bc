use {
    serde::{Deserialize, Serialize},
    solana_cli_output::{QuietDisplay, VerboseDisplay},
    std::fmt::{self, Display, Formatter},
};

fn writeln_name_value(f: &mut dyn fmt::Write, name: &str, value: &str) -> fmt::Result {
    writeln!(f, "{:<20} {}", name, value)
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliClient {
    pub payer: String,
    pub json_rpc_url: String,
    pub program_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_amount: Option<u64>,
}

impl Display for CliClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln_name_value(f, "Payer:", &self.payer)?;
        writeln_name_value(f, "RPC URL:", &self.json_rpc_url)?;
        if let Some(amount) = self.ignored_amount {
            writeln!(f, "Amount {} ignored, nothing was sent", amount)?;
        }
        Ok(())
    }
}

impl QuietDisplay for CliClient {}
impl VerboseDisplay for CliClient {
    fn write_str(&self, w: &mut dyn fmt::Write) -> fmt::Result {
        writeln_name_value(w, "Payer:", &self.payer)?;
        writeln_name_value(w, "RPC URL:", &self.json_rpc_url)?;
        writeln_name_value(w, "Program:", &self.program_id)?;
        if let Some(amount) = self.ignored_amount {
            writeln!(w, "Amount {} ignored, nothing was sent", amount)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliEscrow {
    pub mint: String,
    pub escrow: String,
}

impl Display for CliEscrow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln_name_value(f, "Escrow:", &self.escrow)
    }
}

impl QuietDisplay for CliEscrow {
    fn write_str(&self, w: &mut dyn fmt::Write) -> fmt::Result {
        writeln!(w, "{}", self.escrow)
    }
}
impl VerboseDisplay for CliEscrow {
    fn write_str(&self, w: &mut dyn fmt::Write) -> fmt::Result {
        writeln_name_value(w, "Mint:", &self.mint)?;
        writeln_name_value(w, "Escrow:", &self.escrow)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliTransfer {
    pub escrow: String,
    pub attribute_mint: String,
    pub amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    pub signature: String,
}

impl Display for CliTransfer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln_name_value(f, "Signature:", &self.signature)
    }
}

impl QuietDisplay for CliTransfer {}
impl VerboseDisplay for CliTransfer {
    fn write_str(&self, w: &mut dyn fmt::Write) -> fmt::Result {
        writeln_name_value(w, "Escrow:", &self.escrow)?;
        writeln_name_value(w, "Attribute mint:", &self.attribute_mint)?;
        writeln_name_value(w, "Amount:", &self.amount.to_string())?;
        if let Some(index) = self.index {
            writeln_name_value(w, "Constraint index:", &index.to_string())?;
        }
        writeln_name_value(w, "Signature:", &self.signature)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliConstraintModel {
    pub name: String,
    pub address: String,
    pub signature: String,
}

impl Display for CliConstraintModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln_name_value(f, "Constraint model:", &self.address)?;
        writeln_name_value(f, "Signature:", &self.signature)
    }
}

impl QuietDisplay for CliConstraintModel {}
impl VerboseDisplay for CliConstraintModel {}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliAddresses {
    pub mint: String,
    pub escrow: String,
    pub metadata: String,
    pub edition: String,
    pub owner: String,
    pub escrow_token_account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_mint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_destination: Option<String>,
}

impl Display for CliAddresses {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln_name_value(f, "Escrow:", &self.escrow)?;
        writeln_name_value(f, "Metadata:", &self.metadata)?;
        writeln_name_value(f, "Edition:", &self.edition)?;
        writeln_name_value(f, "Escrow NFT account:", &self.escrow_token_account)?;
        if let (Some(source), Some(destination)) =
            (&self.attribute_source, &self.attribute_destination)
        {
            writeln_name_value(f, "Attribute source:", source)?;
            writeln_name_value(f, "Attribute escrowed:", destination)?;
        }
        Ok(())
    }
}

impl QuietDisplay for CliAddresses {}
impl VerboseDisplay for CliAddresses {}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliEscrowAccount {
    pub escrow: String,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub lamports: u64,
    pub data_len: usize,
}

impl Display for CliEscrowAccount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln_name_value(f, "Escrow:", &self.escrow)?;
        if !self.exists {
            return writeln!(f, "Account does not exist");
        }
        if let Some(owner) = &self.owner {
            writeln_name_value(f, "Owner:", owner)?;
        }
        writeln_name_value(f, "Lamports:", &self.lamports.to_string())?;
        writeln_name_value(f, "Data length:", &self.data_len.to_string())
    }
}

impl QuietDisplay for CliEscrowAccount {}
impl VerboseDisplay for CliEscrowAccount {}
