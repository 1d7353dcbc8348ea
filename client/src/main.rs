/*
 * SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
/* iLO Redfish command line client
 * Finds resources on an HPE iLO through its resource directory (or a manual
 * walk when there is none) and runs a few common configuration changes.
 *
 * USAGE: ./client -H 10.0.0.100 -U admin -P password -c locate Bios
 * -H: Hostname or IP address of the iLO. HTTPS on port 443 unless -p is given.
 * Run with no params for help.
 * Run with `-v` for more output.
 */

use std::path::Path;

use anyhow::{anyhow, Context};
use ilo_redfish::actions::{self, AccountChanges, ActionOutcome, CsrSubject, InventoryKind};
use ilo_redfish::{AuthMethod, Config, Locator, Redfish, Session};
use tracing::{error, info};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::prelude::*;

const COMMANDS: &str = "Command to run:
                features
                directory
                locate TARGET
                get URI
                set_bios ATTRIBUTE VALUE
                boot_order
                add_user USERNAME PASSWORD [LOGINNAME]
                modify_user USERNAME [password=P] [login_name=L] [role=R] [user_name=U]
                snmp on|off [COMMUNITY...]
                csr COMMONNAME ORG ORGUNIT CITY STATE COUNTRY
                get_csr
                import_cert FILE
                ntp SERVER [SERVER...]
                timezone NAME
                uid
                inventory [firmware|software]
                power
                mac
                registries
                upload FILE [flash]
                reset";

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = getopts::Options::new();

    opts.optflag("h", "help", "Print this help");
    opts.optflag("v", "verbose", "Log at DEBUG level. Default is INFO");
    opts.optflag(
        "m",
        "manual",
        "Ignore the resource directory and walk the Redfish tree",
    );
    opts.optflag("b", "basic", "Use HTTP basic auth instead of a session");
    opts.optopt(
        "H",
        "hostname",
        "Hostname or IP address of the iLO. Required unless set in the config file",
        "HOST",
    );
    opts.optopt("p", "port", "iLO port", "PORT");
    opts.optopt("U", "username", "iLO username", "USER");
    opts.optopt("P", "password", "iLO password", "PASS");
    opts.optopt("f", "config", "TOML config file", "FILE");
    opts.optopt(
        "B",
        "bios-password",
        "BIOS admin password, for set_bios and boot_order",
        "PASS",
    );
    opts.optopt("c", "cmd", COMMANDS, "CMD");

    let args_given = opts.parse(&args[1..])?;
    if args_given.opt_present("h") || !args_given.opt_present("c") {
        eprintln!(
            "{}",
            opts.usage("client -H ilo_ip -U ilo_user -P ilo_pass -c cmd [ARGS]")
        );
        return Ok(());
    }

    let log_level = if args_given.opt_present("v") {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(log_level.into())
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);
    tracing_subscriber::registry()
        .with(Layer::default().compact())
        .with(env_filter)
        .init();

    let mut conf = match args_given.opt_str("f") {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };
    if let Some(host) = args_given.opt_str("H") {
        conf.endpoint.host = Some(host);
    }
    if let Some(port) = args_given.opt_str("p") {
        conf.endpoint.port = Some(port.parse().context("invalid port")?);
    }
    if let Some(user) = args_given.opt_str("U") {
        conf.endpoint.user = Some(user);
    }
    if let Some(password) = args_given.opt_str("P") {
        conf.endpoint.password = Some(password);
    }
    if args_given.opt_present("b") {
        conf.endpoint.auth = AuthMethod::Basic;
    }
    if args_given.opt_present("m") {
        conf.locator.force_manual = true;
    }

    let cmd = args_given.opt_str("c").unwrap_or_default();
    let locator = conf.locator()?;

    if cmd == "features" {
        for f in locator.table().iter() {
            match &f.walk {
                Some(w) => info!("{:<28} {:<36} {}", f.name, f.odata_type, w.root),
                None => info!("{:<28} {:<36} -", f.name, f.odata_type),
            }
        }
        return Ok(());
    }

    let pool = conf.pool_builder().build()?;
    let session = pool.connect(conf.endpoint()?, conf.endpoint.auth).await?;

    if cmd == "reset" {
        let pending = actions::reset_ilo(session, &locator, conf.reset_grace()).await?;
        let session = pending.reconnect().await?;
        info!("iLO is back");
        session.logout().await?;
        return Ok(());
    }

    let cmd_args = CommandArgs {
        free: &args_given.free,
        bios_password: args_given.opt_str("B"),
    };
    let result = run(&cmd, &cmd_args, &session, &locator).await;
    // always give the session slot back, the iLO only has a few
    let logout = session.logout().await;
    if let (Err(_), Err(e)) = (&result, &logout) {
        error!("Logout failed: {e}");
    }
    result?;
    logout?;
    Ok(())
}

struct CommandArgs<'a> {
    free: &'a [String],
    bios_password: Option<String>,
}

async fn run(
    cmd: &str,
    args: &CommandArgs<'_>,
    session: &Session,
    locator: &Locator,
) -> Result<(), anyhow::Error> {
    let free = args.free;
    let bios_password = args.bios_password.as_deref();
    match cmd {
        "directory" => match actions::list_directory(session).await? {
            Some(dir) => {
                for e in &dir.instances {
                    info!(
                        "{:<60} {}",
                        e.odata_type.as_deref().unwrap_or("-"),
                        e.odata_id
                    );
                }
            }
            None => info!("This controller has no resource directory"),
        },
        "locate" => {
            let target = free.first().ok_or_else(|| anyhow!("locate needs a TARGET"))?;
            let found = locator.locate(session, target).await?;
            if found.is_empty() {
                info!("{target} is not supported on this controller");
            }
            for r in found {
                info!("{r}");
            }
        }
        "get" => {
            let uri = free.first().ok_or_else(|| anyhow!("get needs a URI"))?;
            let (_, body) = session.get(uri).await?;
            info!("{}", serde_json::to_string_pretty(&body)?);
        }
        "set_bios" => {
            let (Some(attribute), Some(value)) = (free.first(), free.get(1)) else {
                return Err(anyhow!("set_bios needs ATTRIBUTE VALUE"));
            };
            // numbers and booleans go as JSON, everything else as a string
            let value = serde_json::from_str(value)
                .unwrap_or_else(|_| serde_json::Value::String(value.clone()));
            report(
                actions::change_bios_setting(session, locator, attribute, value, bios_password)
                    .await?,
            );
            info!("BIOS settings changes require system restart");
        }
        "boot_order" => {
            report(actions::change_boot_order(session, locator, bios_password).await?);
            info!("The new boot order applies after a system restart");
        }
        "add_user" => {
            let (Some(user), Some(password)) = (free.first(), free.get(1)) else {
                return Err(anyhow!("add_user needs USERNAME PASSWORD"));
            };
            let account = AccountChanges {
                user_name: Some(user.clone()),
                password: Some(password.clone()),
                login_name: free.get(2).cloned(),
                ..Default::default()
            };
            report(actions::add_user_account(session, locator, &account).await?);
        }
        "modify_user" => {
            let user = free
                .first()
                .ok_or_else(|| anyhow!("modify_user needs a USERNAME"))?;
            let mut changes = AccountChanges::default();
            for arg in &free[1..] {
                let (key, value) = arg
                    .split_once('=')
                    .ok_or_else(|| anyhow!("expected KEY=VALUE, got {arg}"))?;
                let value = Some(value.to_string());
                match key {
                    "password" => changes.password = value,
                    "login_name" => changes.login_name = value,
                    "role" => changes.role_id = value,
                    "user_name" => changes.user_name = value,
                    _ => return Err(anyhow!("unknown account field {key}")),
                }
            }
            report(actions::modify_user_account(session, locator, user, &changes).await?);
        }
        "snmp" => {
            let alerts = match free.first().map(String::as_str) {
                Some("on") => true,
                Some("off") => false,
                _ => return Err(anyhow!("snmp needs on|off")),
            };
            report(actions::configure_snmp(session, locator, &free[1..], alerts).await?);
        }
        "csr" => {
            let [common_name, org_name, org_unit, city, state, country] = free else {
                return Err(anyhow!(
                    "csr needs COMMONNAME ORG ORGUNIT CITY STATE COUNTRY"
                ));
            };
            let subject = CsrSubject {
                city: city.clone(),
                common_name: common_name.clone(),
                country: country.clone(),
                org_name: org_name.clone(),
                org_unit: org_unit.clone(),
                state: state.clone(),
            };
            report(actions::generate_csr(session, locator, &subject).await?);
            info!("Run get_csr in a few minutes to fetch the request");
        }
        "get_csr" => match actions::certificate_signing_request(session, locator).await? {
            Some(csr) => info!("{csr}"),
            None => info!("No CSR available yet"),
        },
        "import_cert" => {
            let file = free
                .first()
                .ok_or_else(|| anyhow!("import_cert needs a FILE"))?;
            let pem = tokio::fs::read_to_string(file)
                .await
                .with_context(|| format!("reading {file}"))?;
            report(actions::import_ssl_certificate(session, locator, &pem).await?);
        }
        "ntp" => {
            if free.is_empty() {
                return Err(anyhow!("ntp needs at least one SERVER"));
            }
            report(actions::set_ntp_servers(session, locator, free).await?);
            info!("Reset the iLO for the NTP servers to take effect");
        }
        "timezone" => {
            let tz = free.first().ok_or_else(|| anyhow!("timezone needs a NAME"))?;
            report(actions::set_timezone(session, locator, tz).await?);
        }
        "uid" => {
            report(actions::toggle_uid_light(session, locator).await?);
        }
        "inventory" => {
            let kind = match free.first().map(String::as_str) {
                None | Some("firmware") => InventoryKind::Firmware,
                Some("software") => InventoryKind::Software,
                Some(other) => return Err(anyhow!("unknown inventory {other}")),
            };
            let items = actions::inventory(session, locator, kind).await?;
            if items.is_empty() {
                info!("Inventory is empty");
            }
            for item in items {
                info!(
                    "{:<40} {}",
                    item["Name"].as_str().unwrap_or("-"),
                    item["Version"].as_str().unwrap_or("-")
                );
            }
        }
        "power" => match actions::power_metrics(session, locator).await? {
            Some(metrics) => info!("{metrics:#}"),
            None => info!("No power metrics on this controller"),
        },
        "mac" => {
            for nic in actions::ilo_mac_addresses(session, locator).await? {
                info!(
                    "iLO interface {}: {}",
                    nic.id,
                    nic.mac_address.as_deref().unwrap_or("-")
                );
            }
        }
        "registries" => {
            let found = actions::list_registries(session, locator).await?;
            if found.is_empty() {
                info!("No message registries on this controller");
            }
            for r in found {
                info!("{r}");
            }
        }
        "upload" => {
            let file = free.first().ok_or_else(|| anyhow!("upload needs a FILE"))?;
            let flash = free.get(1).is_some_and(|s| s == "flash");
            report(actions::upload_firmware(session, locator, Path::new(file), true, flash).await?);
        }
        _ => return Err(anyhow!("Unsupported command specified {cmd}")),
    }
    Ok(())
}

fn report(outcome: ActionOutcome) {
    match outcome {
        ActionOutcome::Done(resp) => {
            info!("Success! HTTP {}", resp.status);
            if let Some(body) = resp.body {
                info!("{body:#}");
            }
        }
        ActionOutcome::NotSupported { feature } => {
            info!("{feature} is not supported on this controller");
        }
        ActionOutcome::NotFound { what } => {
            info!("No {what} on this controller");
        }
    }
}
