use crate::Result;
use failure::bail;
use std::net::Ipv4Addr;

/// Host octet of the cRIO on the team network
const CRIO_HOST: u8 = 2;
/// Host octet of the driver station computer on the team network
const COMPUTER_HOST: u8 = 5;

/// Converts the given team number into the address of the cRIO
/// Assumes the cRIO will exist at 10.TE.AM.2
pub fn ip_from_team_number(team: u16) -> Result<Ipv4Addr> {
    team_address(team, CRIO_HOST)
}

/// Converts the given team number into the address of the driver station computer, 10.TE.AM.5
pub fn computer_ip_from_team_number(team: u16) -> Result<Ipv4Addr> {
    team_address(team, COMPUTER_HOST)
}

fn team_address(team: u16, host: u8) -> Result<Ipv4Addr> {
    let high = team / 100;
    if high > u16::from(u8::MAX) {
        bail!("Team {} has no address on a 10.TE.AM.0 network", team);
    }

    Ok(Ipv4Addr::new(10, high as u8, (team % 100) as u8, host))
}
