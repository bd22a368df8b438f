//! Line-oriented shell: one command per line, the current tab re-rendered
//! after each.

use anyhow::{bail, Context};
use checkout_core::application::CheckoutController;
use checkout_core::domain::order::OrderStatus;
use checkout_core::ports::coupon_gateway::CouponGateway;
use checkout_core::ports::order_gateway::OrderGateway;
use checkout_core::state::Tab;
use checkout_core::view;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const HELP: &str = "\
Commands:
  orders | checkout | coupons   switch tab
  name <text>                   order name
  amount <text>                 order amount (clears an applied coupon)
  customer <text>               customer ID
  code <text>                   coupon code
  apply                         apply the coupon code
  place                         create the order
  pay <id> | cancel <id>        mark a CREATED order PAID or CANCELLED
  delete <id>                   delete an order
  refresh                       reload orders and coupons
  help | quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tab(Tab),
    Name(String),
    Amount(String),
    Customer(String),
    Code(String),
    Apply,
    Place,
    Status(i64, OrderStatus),
    Delete(i64),
    Refresh,
    Help,
    Quit,
}

fn order_id(arg: &str) -> anyhow::Result<i64> {
    arg.parse()
        .with_context(|| format!("expected an order id, got {arg:?}"))
}

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        let cmd = match word.to_ascii_lowercase().as_str() {
            "orders" => Command::Tab(Tab::Orders),
            "checkout" => Command::Tab(Tab::Checkout),
            "coupons" => Command::Tab(Tab::Coupons),
            "name" => Command::Name(rest.to_string()),
            "amount" => Command::Amount(rest.to_string()),
            "customer" => Command::Customer(rest.to_string()),
            "code" => Command::Code(rest.to_string()),
            "apply" => Command::Apply,
            "place" => Command::Place,
            "pay" => Command::Status(order_id(rest)?, OrderStatus::Paid),
            "cancel" => Command::Status(order_id(rest)?, OrderStatus::Cancelled),
            "delete" => Command::Delete(order_id(rest)?),
            "refresh" => Command::Refresh,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command {other:?}, try help"),
        };
        Ok(Some(cmd))
    }
}

/// Runs one command. Failures already sit in the banner, so they are not
/// returned. `false` once the user quits.
pub async fn execute<O, C>(ctl: &mut CheckoutController<O, C>, cmd: Command) -> bool
where
    O: OrderGateway,
    C: CouponGateway,
{
    match cmd {
        Command::Tab(tab) => ctl.select_tab(tab),
        Command::Name(name) => ctl.edit_name(&name),
        Command::Amount(amount) => ctl.edit_amount(&amount),
        Command::Customer(id) => ctl.edit_customer_id(&id),
        Command::Code(code) => ctl.edit_coupon_code(&code),
        Command::Apply => {
            let _ = ctl.apply_coupon().await;
        }
        Command::Place => {
            let _ = ctl.submit_order().await;
        }
        Command::Status(id, status) => {
            let _ = ctl.update_order_status(id, status).await;
        }
        Command::Delete(id) => {
            let _ = ctl.delete_order(id).await;
        }
        Command::Refresh => {
            let _ = ctl.refresh().await;
        }
        Command::Help => {}
        Command::Quit => return false,
    }
    true
}

pub async fn run<O, C, R, W>(
    mut ctl: CheckoutController<O, C>,
    input: R,
    mut out: W,
) -> anyhow::Result<()>
where
    O: OrderGateway,
    C: CouponGateway,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let _ = ctl.refresh().await;
    out.write_all(view::render(ctl.state()).as_bytes()).await?;
    out.write_all(b"> ").await?;
    out.flush().await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let text = match Command::parse(&line) {
            Ok(None) => String::new(),
            Ok(Some(Command::Help)) => HELP.to_string(),
            Ok(Some(cmd)) => {
                if !execute(&mut ctl, cmd).await {
                    break;
                }
                view::render(ctl.state())
            }
            Err(e) => format!("{e}\n"),
        };
        out.write_all(text.as_bytes()).await?;
        out.write_all(b"> ").await?;
        out.flush().await?;
    }
    out.flush().await?;
    Ok(())
}
